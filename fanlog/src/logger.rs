use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard},
};

use fanlog_core::{
    FANLOG_CONFIG, Level, Location, MAX_LEVEL, MAX_LOCATION, MessageBuf, Process, ProcessIdentity,
    Record, Settings, Sink, Timestamp,
};

use crate::{ScopeGuard, ScopeKind, SinkGuard};

/// Handle to a sink registered with a [`Logger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(pub(crate) u64);

pub(crate) const BASE_FRAME: u64 = 0;

struct Frame {
    id: u64,
    kind: ScopeKind,
    settings: Settings,
    // Id-counter value when `settings` were last set.
    stamp: u64,
    name: Option<String>,
}

struct SinkSlot {
    frame: u64,
    // Id-counter value when the sink's own settings were last set.
    stamp: u64,
    sink: Sink,
}

/// Settings `slot` logs with: those of the innermost scope set after the
/// sink's own, or the sink's.
fn effective_settings(frames: &[Frame], slot: &SinkSlot) -> Settings {
    frames
        .iter()
        .rev()
        .find(|frame| frame.stamp > slot.stamp)
        .map_or_else(|| slot.sink.settings(), |frame| frame.settings)
}

struct LoggerState {
    // Never empty: the base frame stays at index 0.
    frames: Vec<Frame>,
    // Keyed by registration order; frames and sinks share one id counter.
    sinks: BTreeMap<u64, SinkSlot>,
    next_id: u64,
    process: ProcessIdentity,
}

impl LoggerState {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn top(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn frame_mut(&mut self, id: u64) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|frame| frame.id == id)
    }

    fn set_frame_settings(&mut self, id: u64, settings: Settings) {
        let stamp = self.next_id();
        if let Some(frame) = self.frame_mut(id) {
            frame.settings = settings;
            frame.stamp = stamp;
        }
    }

    /// Sinks registered at or above the topmost global frame receive records.
    fn visible_from(&self) -> u64 {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.kind == ScopeKind::Global)
            .map_or(BASE_FRAME, |frame| frame.id)
    }

    fn process_name(&self) -> &str {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.name.as_deref())
            .unwrap_or(self.process.name.as_str())
    }
}

/// Dispatcher fanning records out to its sinks, newest sink first.
///
/// Each sink filters and formats with its own settings. Settings given to a
/// scope, or to the logger, replace those of every sink already registered
/// until the scope ends; sinks registered or reconfigured later keep their
/// own.
///
/// Calls are serialized by one lock. The message is formatted before the
/// lock is taken, so `Display` impls may log; sink writers may not. Sinks
/// live in an ordered map, so registering and removing one is O(log n) in
/// the number of sinks.
pub struct Logger {
    state: Mutex<LoggerState>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A logger with default settings and no sinks.
    pub fn new() -> Self {
        Self::with_process(ProcessIdentity::current())
    }

    pub fn with_process(process: ProcessIdentity) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                frames: vec![Frame {
                    id: BASE_FRAME,
                    kind: ScopeKind::Global,
                    settings: Settings::default(),
                    stamp: BASE_FRAME,
                    name: None,
                }],
                sinks: BTreeMap::new(),
                next_id: BASE_FRAME + 1,
                process,
            }),
        }
    }

    /// A logger set up from the `FANLOG_*` environment variables.
    pub fn from_env() -> Self {
        let config = &*FANLOG_CONFIG;
        let settings = config.settings();
        let logger = Self::new();
        logger.set_settings(settings);
        if config.STDOUT {
            logger.add_sink(Sink::stdout().with_settings(settings));
        }
        if let Some(path) = config.file() {
            logger.add_sink(Sink::file(path).with_settings(settings));
        }
        #[cfg(unix)]
        if config.SYSLOG {
            let ident = logger.process_name();
            logger.add_sink(Sink::syslog(&ident, config.syslog_facility()).with_settings(settings));
        }
        logger
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Settings of the innermost scope.
    pub fn settings(&self) -> Settings {
        self.lock().top().settings
    }

    /// Replaces the settings of the innermost scope. They apply to every
    /// sink registered so far.
    pub fn set_settings(&self, settings: Settings) {
        let mut state = self.lock();
        let top = state.top().id;
        state.set_frame_settings(top, settings);
    }

    /// Whether any sink receiving records would show `level`.
    pub fn enabled(&self, level: Level) -> bool {
        let state = self.lock();
        let visible_from = state.visible_from();
        level <= MAX_LEVEL
            && state
                .sinks
                .values()
                .filter(|slot| slot.frame >= visible_from)
                .any(|slot| effective_settings(&state.frames, slot).is_shown(level))
    }

    /// Name written in process segments: the innermost override, or the
    /// process identity.
    pub fn process_name(&self) -> String {
        self.lock().process_name().to_string()
    }

    /// Registers `sink` with the innermost scope.
    pub fn add_sink(&self, sink: Sink) -> SinkId {
        let mut state = self.lock();
        let frame = state.top().id;
        Self::insert_sink(&mut state, frame, sink)
    }

    fn insert_sink(state: &mut LoggerState, frame: u64, sink: Sink) -> SinkId {
        let id = state.next_id();
        state.sinks.insert(
            id,
            SinkSlot {
                frame,
                stamp: id,
                sink,
            },
        );
        SinkId(id)
    }

    pub(crate) fn add_sink_to(&self, frame: u64, sink: Sink) -> SinkId {
        let mut state = self.lock();
        Self::insert_sink(&mut state, frame, sink)
    }

    /// Unregisters a sink and hands it back; unknown ids are ignored.
    pub fn remove_sink(&self, id: SinkId) -> Option<Sink> {
        self.lock().sinks.remove(&id.0).map(|slot| slot.sink)
    }

    /// Registers `sink` until the returned guard is dropped.
    pub fn attach_sink(&self, sink: Sink) -> SinkGuard<'_> {
        SinkGuard::new(self, self.add_sink(sink))
    }

    /// Gives the sink its own settings again, over those of the enclosing
    /// scopes. Returns `false` when no sink has this id.
    pub fn set_sink_settings(&self, id: SinkId, settings: Settings) -> bool {
        let mut state = self.lock();
        let stamp = state.next_id();
        match state.sinks.get_mut(&id.0) {
            Some(slot) => {
                slot.sink.set_settings(settings);
                slot.stamp = stamp;
                true
            }
            None => false,
        }
    }

    /// Settings the sink currently logs with.
    pub fn sink_settings(&self, id: SinkId) -> Option<Settings> {
        let state = self.lock();
        state
            .sinks
            .get(&id.0)
            .map(|slot| effective_settings(&state.frames, slot))
    }

    /// Hides every sink registered before this scope until it ends. Sinks
    /// registered in it keep their own settings.
    pub fn scope_global(&self, settings: Settings) -> ScopeGuard<'_> {
        self.push_frame(ScopeKind::Global, settings)
    }

    /// Layers a scope on top; earlier sinks keep receiving records, under
    /// `settings` until the scope ends.
    pub fn scope_local(&self, settings: Settings) -> ScopeGuard<'_> {
        self.push_frame(ScopeKind::Local, settings)
    }

    fn push_frame(&self, kind: ScopeKind, settings: Settings) -> ScopeGuard<'_> {
        let mut state = self.lock();
        let id = state.next_id();
        state.frames.push(Frame {
            id,
            kind,
            settings,
            stamp: id,
            name: None,
        });
        ScopeGuard::new(self, id, kind)
    }

    pub(crate) fn set_frame_settings(&self, frame: u64, settings: Settings) {
        self.lock().set_frame_settings(frame, settings);
    }

    pub(crate) fn set_frame_name(&self, frame: u64, name: Option<String>) {
        if let Some(frame) = self.lock().frame_mut(frame) {
            frame.name = name;
        }
    }

    /// Removes the frame and the sinks registered with it.
    pub(crate) fn pop_frame(&self, frame: u64) {
        if frame == BASE_FRAME {
            return;
        }
        let released: BTreeMap<u64, SinkSlot> = {
            let mut state = self.lock();
            state.frames.retain(|f| f.id != frame);
            let (released, kept) = std::mem::take(&mut state.sinks)
                .into_iter()
                .partition(|(_, slot)| slot.frame == frame);
            state.sinks = kept;
            released
        };
        // Closing files and syslog happens outside the lock.
        drop(released);
    }

    /// Logs a formatted message.
    ///
    /// # Panics
    ///
    /// If `level` is more verbose than [`MAX_LEVEL`], or a location is given
    /// for a level outside [`MAX_LOCATION`].
    pub fn emit(&self, level: Level, location: Option<&Location<'_>>, args: fmt::Arguments<'_>) {
        Self::check_call(level, location);
        if !self.enabled(level) {
            return;
        }
        let mut message = MessageBuf::new();
        message.append(args);
        self.dispatch(level, location, message.as_str());
    }

    /// Logs a record without a message.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`Logger::emit`].
    pub fn emit_empty(&self, level: Level, location: Option<&Location<'_>>) {
        Self::check_call(level, location);
        if !self.enabled(level) {
            return;
        }
        self.dispatch(level, location, "");
    }

    fn check_call(level: Level, location: Option<&Location<'_>>) {
        assert!(level <= MAX_LEVEL, "log level {level} is above {MAX_LEVEL}");
        assert!(
            location.is_none() || MAX_LOCATION.contains(level),
            "source location given for level {level}"
        );
    }

    fn dispatch(&self, level: Level, location: Option<&Location<'_>>, message: &str) {
        let mut state = self.lock();
        let visible_from = state.visible_from();
        let LoggerState {
            frames,
            sinks,
            process,
            ..
        } = &mut *state;
        let frames: &[Frame] = frames;
        let name = frames
            .iter()
            .rev()
            .find_map(|frame| frame.name.as_deref())
            .unwrap_or(process.name.as_str());
        let wants_zone_link = sinks
            .values()
            .filter(|slot| slot.frame >= visible_from)
            .any(|slot| effective_settings(frames, slot).is_tz_sym_link());
        let timestamp = Timestamp::capture(wants_zone_link);
        let record = Record {
            level,
            location: location.copied(),
            message,
            timestamp: &timestamp,
            process: Process {
                name,
                pid: process.pid,
            },
        };
        for slot in sinks
            .values_mut()
            .rev()
            .filter(|slot| slot.frame >= visible_from)
        {
            let settings = effective_settings(frames, slot);
            slot.sink.log_as(&record, &settings);
        }
    }

    pub fn flush(&self) {
        for slot in self.lock().sinks.values_mut() {
            slot.sink.flush();
        }
    }

    /// Logs `Assertion failed: <assertion>.` at [`Level::Internal`],
    /// followed by `details` as a second record when given.
    pub fn log_failed_assertion(
        &self,
        assertion: &str,
        location: &Location<'_>,
        details: Option<fmt::Arguments<'_>>,
    ) {
        let follows = if details.is_some() {
            ". Detailed info follows"
        } else {
            ""
        };
        self.emit(
            Level::Internal,
            Some(location),
            format_args!("Assertion failed: {assertion}{follows}."),
        );
        if let Some(details) = details {
            self.emit(Level::Internal, Some(location), details);
        }
    }

    /// Logs the failed assertion, flushes every sink and aborts.
    pub fn fail_fatal(
        &self,
        assertion: &str,
        location: &Location<'_>,
        details: Option<fmt::Arguments<'_>>,
    ) -> ! {
        self.log_failed_assertion(assertion, location, details);
        self.flush();
        std::process::abort()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use crossbeam_channel::Receiver;
    use fanlog_core::{LocationMask, LogChannel, MessageFormat};

    use super::*;

    const HERE: Location<'static> = Location::new(3, "src/job.rs", "job::run");

    fn logger() -> Logger {
        Logger::with_process(ProcessIdentity::new("test", 1))
    }

    fn message_only() -> Settings {
        Settings::default().with_format(MessageFormat::MESSAGE)
    }

    fn channel(settings: Settings) -> (Sink, Receiver<String>) {
        let (sink, receiver) = Sink::channel();
        (sink.with_settings(settings), receiver)
    }

    fn drain(receiver: &Receiver<String>) -> Vec<String> {
        receiver.try_iter().collect()
    }

    #[test]
    fn sinks_receive_records_newest_first() {
        let logger = logger();
        let (writer, receiver) = LogChannel::unbounded();
        logger.add_sink(Sink::new(writer.clone()).with_settings(message_only()));
        logger.add_sink(
            Sink::new(writer).with_settings(
                Settings::default().with_format(MessageFormat::NAME | MessageFormat::MESSAGE),
            ),
        );
        logger.emit(Level::Info, None, format_args!("value={}", 5));
        assert_eq!(drain(&receiver), ["test: INFO: value=5", "INFO: value=5"]);
    }

    #[test]
    fn each_sink_filters_on_its_own_settings() {
        let logger = logger();
        let (verbose, verbose_rx) = channel(message_only());
        let (quiet, quiet_rx) = channel(message_only().with_verbosity(Level::Error));
        logger.add_sink(verbose);
        let quiet = logger.add_sink(quiet);
        logger.emit(Level::Warning, None, format_args!("hot"));
        assert_eq!(drain(&verbose_rx), ["WARNING: hot"]);
        assert!(drain(&quiet_rx).is_empty());

        assert!(logger.set_sink_settings(quiet, message_only()));
        assert_eq!(logger.sink_settings(quiet), Some(message_only()));
        logger.emit(Level::Warning, None, format_args!("hotter"));
        assert_eq!(drain(&quiet_rx), ["WARNING: hotter"]);
    }

    #[test]
    fn removed_sink_receives_nothing() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        let id = logger.add_sink(sink);
        assert!(logger.remove_sink(id).is_some());
        logger.emit(Level::Error, None, format_args!("lost"));
        assert!(drain(&receiver).is_empty());
        assert!(logger.remove_sink(id).is_none());
        assert!(!logger.set_sink_settings(id, message_only()));
    }

    #[test]
    fn attached_sink_is_removed_with_its_guard() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        let guard = logger.attach_sink(sink);
        logger.emit(Level::Info, None, format_args!("seen"));
        drop(guard);
        logger.emit(Level::Info, None, format_args!("unseen"));
        assert_eq!(drain(&receiver), ["INFO: seen"]);
    }

    #[test]
    fn record_without_message_ends_with_a_dot() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        logger.add_sink(sink);
        logger.emit_empty(Level::Internal, None);
        logger.emit(Level::Info, None, format_args!(""));
        assert_eq!(drain(&receiver), ["INTERNAL ERROR.", "INFO."]);
    }

    #[test]
    fn word_wrap_splits_full_debug_records() {
        let logger = logger();
        let format = MessageFormat::DEBUG_INFO | MessageFormat::WORD_WRAP;
        let (wrapped, wrapped_rx) = channel(message_only().with_format(format));
        let (flat, flat_rx) = channel(message_only().with_format(MessageFormat::DEBUG_INFO));
        logger.add_sink(wrapped);
        logger.add_sink(flat);
        logger.emit(Level::Debug, Some(&HERE), format_args!("ready"));
        assert_eq!(
            drain(&wrapped_rx),
            ["DEBUG at src/job.rs:3 in job::run:", "-> ready"]
        );
        assert_eq!(drain(&flat_rx), ["DEBUG at src/job.rs:3 in job::run: ready"]);
    }

    #[test]
    fn scope_location_mask_withholds_locations() {
        let logger = logger();
        let debug_info = message_only().with_format(MessageFormat::DEBUG_INFO);
        let (sink, receiver) = channel(debug_info);
        logger.add_sink(sink);
        logger.set_settings(debug_info.with_location_mask(LocationMask::EMPTY));
        logger.emit(Level::Debug, Some(&HERE), format_args!("bare"));
        assert_eq!(drain(&receiver), ["DEBUG: bare"]);
    }

    #[test]
    fn logger_settings_replace_those_of_registered_sinks() {
        let logger = logger();
        let (sink, receiver) = Sink::channel();
        let id = logger.add_sink(sink);
        logger.set_settings(message_only());
        assert_eq!(logger.sink_settings(id), Some(message_only()));
        logger.emit(Level::Info, None, format_args!("x"));
        assert_eq!(drain(&receiver), ["INFO: x"]);
    }

    #[test]
    fn sink_added_in_a_quiet_scope_shows_its_own_levels() {
        let logger = logger();
        let (outer, outer_rx) = channel(message_only());
        logger.add_sink(outer);
        let scope = logger.scope_local(message_only().with_verbosity(Level::Critical));
        let (inner, inner_rx) = channel(message_only().with_verbosity(Level::Info));
        scope.add_sink(inner);
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));
        logger.emit(Level::Info, None, format_args!("sink accepts info"));
        logger.emit(Level::Critical, None, format_args!("both"));
        assert_eq!(drain(&inner_rx), ["INFO: sink accepts info", "CRITICAL ERROR: both"]);
        assert_eq!(drain(&outer_rx), ["CRITICAL ERROR: both"]);
    }

    #[test]
    fn scope_format_applies_to_existing_sinks_until_popped() {
        let logger = logger();
        let named = Settings::default().with_format(MessageFormat::NAME | MessageFormat::MESSAGE);
        let (sink, receiver) = channel(named);
        let id = logger.add_sink(sink);
        {
            let _scope = logger.scope_local(message_only());
            assert_eq!(logger.sink_settings(id), Some(message_only()));
            logger.emit(Level::Info, None, format_args!("scoped"));
        }
        assert_eq!(logger.sink_settings(id), Some(named));
        logger.emit(Level::Info, None, format_args!("restored"));
        assert_eq!(drain(&receiver), ["INFO: scoped", "test: INFO: restored"]);
    }

    #[test]
    fn sink_settings_set_inside_a_scope_win_over_it() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        let id = logger.add_sink(sink);
        let _scope = logger.scope_local(message_only().with_verbosity(Level::Error));
        logger.emit(Level::Info, None, format_args!("muted"));
        assert!(logger.set_sink_settings(id, message_only()));
        logger.emit(Level::Info, None, format_args!("heard"));
        assert_eq!(drain(&receiver), ["INFO: heard"]);
    }

    #[test]
    fn scopes_restore_the_parent_settings() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        logger.add_sink(sink);
        let base = logger.settings();
        {
            let outer = logger.scope_local(message_only().with_verbosity(Level::Error));
            assert_eq!(logger.settings().verbosity(), Level::Error);
            {
                let _inner = logger.scope_local(message_only().with_verbosity(Level::Critical));
                logger.emit(Level::Error, None, format_args!("dropped"));
                logger.emit(Level::Critical, None, format_args!("kept"));
            }
            assert_eq!(logger.settings().verbosity(), Level::Error);
            logger.emit(Level::Warning, None, format_args!("still quiet"));
            outer.set_settings(message_only().with_verbosity(Level::Warning));
            logger.emit(Level::Warning, None, format_args!("warned"));
        }
        assert_eq!(logger.settings(), base);
        logger.emit(Level::Debug, None, format_args!("verbose again"));
        assert_eq!(
            drain(&receiver),
            ["CRITICAL ERROR: kept", "WARNING: warned", "DEBUG: verbose again"]
        );
    }

    #[test]
    fn scope_is_popped_when_unwinding() {
        let logger = logger();
        let base = logger.settings();
        let (sink, receiver) = channel(message_only());
        let unwound = catch_unwind(AssertUnwindSafe(|| {
            let scope = logger.scope_global(Settings::default().with_verbosity(Level::Critical));
            scope.add_sink(sink);
            panic!("job failed");
        }));
        assert!(unwound.is_err());
        assert_eq!(logger.settings(), base);
        logger.emit(Level::Critical, None, format_args!("after"));
        assert!(drain(&receiver).is_empty());
    }

    #[test]
    fn global_scope_hides_outer_sinks_and_local_scope_does_not() {
        let logger = logger();
        let (outer, outer_rx) = channel(message_only());
        logger.add_sink(outer);
        {
            let scope = logger.scope_global(Settings::default());
            assert!(!logger.enabled(Level::Info));
            let (inner, inner_rx) = channel(message_only());
            scope.add_sink(inner);
            logger.emit(Level::Info, None, format_args!("global"));
            assert_eq!(drain(&inner_rx), ["INFO: global"]);
            assert!(drain(&outer_rx).is_empty());
        }
        {
            let scope = logger.scope_local(message_only());
            let (inner, inner_rx) = channel(message_only());
            scope.add_sink(inner);
            logger.emit(Level::Info, None, format_args!("local"));
            assert_eq!(drain(&inner_rx), ["INFO: local"]);
            assert_eq!(drain(&outer_rx), ["INFO: local"]);
        }
        logger.emit(Level::Info, None, format_args!("base"));
        assert_eq!(drain(&outer_rx), ["INFO: base"]);
    }

    #[test]
    fn scope_sinks_are_torn_down_with_the_scope() {
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        let scope = logger.scope_local(Settings::default());
        let id = scope.add_sink(sink);
        drop(scope);
        assert!(logger.remove_sink(id).is_none());
        assert!(receiver.recv().is_err());
    }

    #[test]
    fn scope_process_name_overrides_the_identity() {
        let logger = logger();
        let format = MessageFormat::NAME | MessageFormat::MESSAGE;
        let (sink, receiver) = channel(message_only().with_format(format));
        logger.add_sink(sink);
        {
            let scope = logger.scope_local(message_only().with_format(format));
            scope.set_process_name("worker");
            assert_eq!(logger.process_name(), "worker");
            logger.emit(Level::Info, None, format_args!("x"));
        }
        logger.emit(Level::Info, None, format_args!("y"));
        assert_eq!(drain(&receiver), ["worker: INFO: x", "test: INFO: y"]);
    }

    #[test]
    fn failed_assertion_is_logged_as_internal_error() {
        let logger = logger();
        let (sink, receiver) = channel(message_only().with_format(MessageFormat::DEBUG_INFO));
        logger.add_sink(sink);
        let here = Location::new(12, "src/math.rs", "math::sqrt");
        logger.log_failed_assertion("x >= 0", &here, None);
        logger.log_failed_assertion("y > 0", &here, Some(format_args!("y was {}", -1)));
        assert_eq!(
            drain(&receiver),
            [
                "INTERNAL ERROR at src/math.rs:12 in math::sqrt: Assertion failed: x >= 0.",
                "INTERNAL ERROR at src/math.rs:12 in math::sqrt: Assertion failed: y > 0. Detailed info follows.",
                "INTERNAL ERROR at src/math.rs:12 in math::sqrt: y was -1",
            ]
        );
    }

    #[test]
    fn message_is_formatted_before_locking() {
        struct Noisy<'a>(&'a Logger);
        impl fmt::Display for Noisy<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.emit(Level::Debug, None, format_args!("inner"));
                f.write_str("outer")
            }
        }
        let logger = logger();
        let (sink, receiver) = channel(message_only());
        logger.add_sink(sink);
        logger.emit(Level::Info, None, format_args!("{}", Noisy(&logger)));
        assert_eq!(drain(&receiver), ["DEBUG: inner", "INFO: outer"]);
    }

    #[test]
    fn records_without_a_receiving_sink_are_not_formatted() {
        struct Counted<'a>(&'a std::cell::Cell<u32>);
        impl fmt::Display for Counted<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(self.0.get() + 1);
                f.write_str("counted")
            }
        }
        let calls = std::cell::Cell::new(0);
        let logger = logger();
        let (sink, receiver) = channel(message_only().with_verbosity(Level::Warning));
        logger.add_sink(sink);
        logger.emit(Level::Info, None, format_args!("{}", Counted(&calls)));
        assert_eq!(calls.get(), 0);
        logger.emit(Level::Error, None, format_args!("{}", Counted(&calls)));
        assert_eq!(calls.get(), 1);
        assert_eq!(drain(&receiver), ["ERROR: counted"]);
    }

    #[test]
    #[cfg(feature = "max_level_info")]
    #[should_panic(expected = "is above")]
    fn levels_compiled_out_cannot_be_emitted() {
        assert!(!logger().enabled(Level::Debug));
        logger().emit(Level::Debug, None, format_args!("no"));
    }

    #[test]
    #[should_panic(expected = "source location given")]
    fn location_outside_the_allowed_levels_panics() {
        logger().emit(Level::Info, Some(&HERE), format_args!("no"));
    }
}
