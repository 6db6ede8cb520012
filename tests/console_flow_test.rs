// End-to-end console behaviour through the public API

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use trieshell::core::tokenizer::tokenize;
use trieshell::{
    CommandBuilder, CommandSource, Console, ConsoleLogger, DispatchOutcome, Logger, Service, ServiceRegistry,
    Severity,
};

#[derive(Default)]
struct Transcript {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl ConsoleLogger for Transcript {
    fn log(&self, message: &str, severity: Severity) {
        self.lines.lock().unwrap().push((severity, message.to_owned()));
    }
}

impl Transcript {
    fn take(&self) -> Vec<(Severity, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

type Calls = Rc<RefCell<Vec<String>>>;

/// The dice commands a game would register.
struct DiceCommands {
    calls: Calls,
}

impl CommandSource for DiceCommands {
    fn register(&self, builder: &mut CommandBuilder<'_>) {
        let (c1, c2, c3, c4) = (
            Rc::clone(&self.calls),
            Rc::clone(&self.calls),
            Rc::clone(&self.calls),
            Rc::clone(&self.calls),
        );
        let mut dice = builder.group("dice");
        dice.add_named("roll", &["v1"], move |v1: i32, _log: Logger| {
            c1.borrow_mut().push(format!("roll({v1})"));
        })
        .add_named("roll", &["v1", "v2"], move |v1: i32, v2: i32, _log: Logger| {
            c2.borrow_mut().push(format!("roll({v1}, {v2})"));
        })
        .add_named("roll", &["v1", "v2", "v3"], move |v1: i32, v2: i32, v3: i32, _log: Logger| {
            c3.borrow_mut().push(format!("roll({v1}, {v2}, {v3})"));
        })
        .add_named("rollrepeat", &["value", "count"], move |value: i32, count: i32| {
            c4.borrow_mut().push(format!("rollrepeat({value}, {count})"));
        })
        .add("run", |log: Logger| log.info("running"));
    }
}

fn console() -> (Console, Arc<Transcript>, Calls) {
    let transcript = Arc::new(Transcript::default());
    let calls = Calls::default();
    let console = Console::builder()
        .logger_handle(Logger::from_shared(Arc::clone(&transcript) as Arc<dyn ConsoleLogger>))
        .source(&DiceCommands { calls: Rc::clone(&calls) })
        .build()
        .unwrap();
    (console, transcript, calls)
}

#[test]
fn test_tokenizer_collapses_whitespace() {
    assert_eq!(tokenize("  roll   5   3 "), vec!["roll", "5", "3"]);
    assert_eq!(tokenize("\t"), vec![""]);
}

#[test]
fn test_overload_selected_by_token_count() {
    let (console, transcript, calls) = console();

    assert!(console.execute("dice roll 4 4").is_matched());
    assert!(console.execute("dice roll 6").is_matched());
    assert!(console.execute("dice   roll 1 2 3").is_matched());

    assert_eq!(
        calls.borrow().as_slice(),
        &["roll(4, 4)", "roll(6)", "roll(1, 2, 3)"]
    );
    assert!(transcript.take().is_empty());
}

#[test]
fn test_each_line_runs_one_handler_or_logs_one_notice() {
    let (console, transcript, calls) = console();

    for line in ["dice roll 4 4 4 4 4", "dice roll x", "dice", "", "coin flip"] {
        assert_eq!(console.execute(line), DispatchOutcome::Exhausted, "{line}");
        let notices = transcript.take();
        assert_eq!(notices.len(), 1, "{line}");
        assert_eq!(notices[0].0, Severity::Warning);
    }
    assert!(calls.borrow().is_empty());

    console.execute("dice run");
    assert_eq!(transcript.take(), vec![(Severity::Info, "running".to_string())]);
}

#[test]
fn test_repeated_lines_repeat_the_same_call() {
    let (console, _, calls) = console();

    console.execute("dice rollrepeat 3 2");
    console.execute("dice rollrepeat 3 2");
    assert_eq!(calls.borrow().as_slice(), &["rollrepeat(3, 2)", "rollrepeat(3, 2)"]);
}

#[test]
fn test_suggestions_and_hints() {
    let (console, _, _) = console();

    assert_eq!(console.suggest("dice ro"), vec!["dice roll", "dice rollrepeat"]);
    assert_eq!(console.suggest("d"), vec!["dice"]);
    assert_eq!(console.suggest("dice"), vec!["dice roll", "dice rollrepeat", "dice run"]);

    assert_eq!(console.argument_hint("dice roll ").as_deref(), Some("dice roll <v1> [v2] [v3]"));
    assert_eq!(console.argument_hint("dice roll 1 2").as_deref(), Some("dice roll 1 2 [v3]"));
    assert_eq!(
        console.argument_hint("dice rollrepeat").as_deref(),
        Some("dice rollrepeat <value> <count>")
    );
    assert_eq!(console.echo("dice ro"), "dice roll");
}

#[test]
fn test_injected_only_command_takes_no_tokens() {
    let (console, transcript, _) = console();

    assert!(console.execute("dice run").is_matched());
    assert_eq!(console.execute("dice run now"), DispatchOutcome::Exhausted);
    assert_eq!(transcript.take().len(), 2);
}

#[test]
fn test_booleans_floats_and_services() {
    struct Table {
        name: &'static str,
    }

    let seen: Calls = Calls::default();
    let (s1, s2) = (Rc::clone(&seen), Rc::clone(&seen));
    let mut services = ServiceRegistry::new();
    services.insert(Table { name: "d20" });

    let console = Console::builder()
        .services(services)
        .register(move |b| {
            b.add_named("toggle", &["on"], move |on: bool| s1.borrow_mut().push(format!("toggle({on})")))
                .add_named("scale", &["factor"], move |factor: f32, table: Service<Table>| {
                    s2.borrow_mut().push(format!("scale({factor}, {})", table.name));
                });
        })
        .build()
        .unwrap();

    for line in ["toggle t", "toggle 1", "toggle on", "toggle f", "toggle 0", "toggle off"] {
        assert!(console.execute(line).is_matched(), "{line}");
    }
    assert_eq!(console.execute("toggle maybe"), DispatchOutcome::Exhausted);
    assert!(console.execute("scale 1.5").is_matched());

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            "toggle(true)",
            "toggle(true)",
            "toggle(true)",
            "toggle(false)",
            "toggle(false)",
            "toggle(false)",
            "scale(1.5, d20)",
        ]
    );
}

#[test]
fn test_unsupported_parameter_stops_dispatch() {
    let transcript = Arc::new(Transcript::default());
    let called = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&called);

    let console = Console::builder()
        .logger_handle(Logger::from_shared(Arc::clone(&transcript) as Arc<dyn ConsoleLogger>))
        .register(move |b| {
            b.add("key", |_c: char| {})
                .add_named("key", &["name"], move |_name: String| *flag.borrow_mut() = true);
        })
        .build()
        .unwrap();

    assert!(matches!(console.execute("key a"), DispatchOutcome::Unsupported(_)));
    assert!(!*called.borrow());

    let notices = transcript.take();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, Severity::Error);
}
