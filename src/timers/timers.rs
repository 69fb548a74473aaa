use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimers,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }
}

// timers are kept in the order they were first started
// so that reports list the solve phases in sequence
#[derive(Debug, Default)]
struct SubTimers(Vec<(&'static str, InnerTimer)>);

impl SubTimers {
    fn get(&self, key: &str) -> Option<&InnerTimer> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, t)| t)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut InnerTimer> {
        self.0.iter_mut().find(|(k, _)| *k == key).map(|(_, t)| t)
    }

    fn entry(&mut self, key: &'static str) -> &mut InnerTimer {
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(idx) => &mut self.0[idx].1,
            None => {
                self.0.push((key, InnerTimer::default()));
                let last = self.0.len() - 1;
                &mut self.0[last].1
            }
        }
    }

    fn total_time(&self) -> Duration {
        self.0
            .iter()
            .fold(Duration::ZERO, |acc, (_, t)| acc + t.elapsed)
    }

    fn print(&self, out: &mut impl Write, depth: usize) -> std::io::Result<()> {
        for (key, val) in self.0.iter() {
            let tabs = format!("{: <1$}", "", 4 * depth);
            writeln!(out, "{}{:} : {:?}", tabs, *key, val.elapsed)?;
            val.subtimers.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// Nested wall-clock timers for the phases of a solve
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimers,
}

impl Timers {
    fn active_subtimers(&mut self) -> &mut SubTimers {
        let mut current = &mut self.subtimers;
        for key in self.stack.iter() {
            let Some(idx) = current.0.iter().position(|(k, _)| k == key) else {
                break;
            };
            current = &mut current.0[idx].1.subtimers;
        }
        current
    }

    /// start a timer named `key` as a child of the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        self.active_subtimers().entry(key).start();
        self.stack.push(key);
    }

    /// stop the current timer and make its parent current
    pub fn stop_current(&mut self) {
        let Some(key) = self.stack.pop() else {
            return;
        };
        if let Some(timer) = self.active_subtimers().get_mut(key) {
            timer.stop();
        }
    }

    /// elapsed time of a top level timer
    pub fn elapsed(&self, key: &str) -> Option<Duration> {
        self.subtimers.get(key).map(|t| t.elapsed)
    }

    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        self.subtimers.print(out, 0)
    }
}

/// Time a block against `$timer` under `$key` and yield the block's value.
macro_rules! timeit {
    ($timer:expr => $key:literal; $($tt:tt)+) => {{
        $timer.start_as_current($key);
        let result = { $($tt)+ };
        $timer.stop_current();
        result
    }};
}
pub(crate) use timeit;

#[test]
fn test_timers_nesting() {
    let mut timers = Timers::default();

    let value = timeit! {timers => "solve";
        let inner = timeit! {timers => "factor"; 2 + 3};
        inner * 2
    };
    assert_eq!(value, 10);

    timeit! {timers => "verify"; ()};

    assert!(timers.elapsed("solve").is_some());
    assert!(timers.elapsed("verify").is_some());
    assert!(timers.elapsed("factor").is_none());
    assert!(timers.stack.is_empty());

    let mut out = Vec::new();
    timers.print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("solve : "));
    assert!(lines[1].starts_with("    factor : "));
    assert!(lines[2].starts_with("verify : "));
}

#[test]
fn test_timers_unbalanced_stop() {
    let mut timers = Timers::default();
    timers.stop_current();
    assert_eq!(timers.total_time(), Duration::ZERO);
}
