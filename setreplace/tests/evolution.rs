use setreplace::scope::Problem;
use setreplace::{Atom, Config, Set, INITIAL_EVENT};
use setreplace_parse::CmdIter;

fn set(src: &str, config: Config) -> Set {
    let cmds = CmdIter::new(src).map(|cmd| cmd.unwrap());
    Problem::from_commands(cmds).unwrap().into_set(config)
}

const GROWTH: &str = "
    rule {x, y}, {x, z} -> {x, z}, {x, w}, {y, w}, {z, w}.
    init {1, 1}, {1, 1}.
";

const TWO_RULES: &str = "
    (; reduce loops first, then grow ;)
    rule {x, x}, {x, y} -> {y, x}.
    rule {x, y} -> {y, z}, {z, x}, {z, z}.
    init {1, 2}, {2, 3}.
";

#[test]
fn chain_example() {
    let mut s = set("rule {x, y}, {y, z} -> {x, z}, {z, w}. init {1, 2}, {2, 3}.", Config::default());
    assert_eq!(s.replace(), 1);
    assert_eq!(s.expressions(), [[1, 3], [3, 4]]);

    // the outputs form a chain again, so the rule keeps matching
    assert_eq!(s.replace(), 1);
    assert_eq!(s.expressions(), [[1, 4], [4, 5]]);
}

#[test]
fn monotonic_ids_and_single_consumption() {
    let mut s = set(GROWTH, Config::default());
    assert_eq!(s.replace_n(50), 50);
    assert_eq!(s.expressions().len(), 2 + 2 * 50);

    let mut last_atom: Atom = 1;
    let mut last_output = None;
    for event in s.events() {
        for input in &event.inputs {
            let expr = s.expression(*input).unwrap();
            // consumed exactly by this event, after its creation
            assert_eq!(expr.destroyed_by, Some(event.id));
            assert!(expr.created_by < event.id);
        }
        let mut inputs = event.inputs.clone();
        inputs.sort_unstable();
        inputs.dedup();
        assert_eq!(inputs.len(), event.inputs.len());

        for output in &event.outputs {
            assert!(last_output.map_or(true, |last| *output > last));
            last_output = Some(*output);
            let expr = s.expression(*output).unwrap();
            assert_eq!(expr.created_by, event.id);
            assert_eq!(expr.generation, event.generation);
        }

        // the fresh atom `w` exceeds all atoms seen before
        let w = s.expression(event.outputs[1]).unwrap().atoms[1];
        assert!(w > last_atom);
        last_atom = w;
    }
}

#[test]
fn arity_preservation() {
    let mut s = set(TWO_RULES, Config::default());
    s.replace_n(30);
    for event in s.events() {
        let rule = &s.rules()[event.rule];
        assert_eq!(event.outputs.len(), rule.outputs().len());
        for (output, pattern) in event.outputs.iter().zip(rule.outputs()) {
            assert_eq!(s.expression(*output).unwrap().arity(), pattern.len());
        }
    }
}

#[test]
fn determinism() {
    let run = || {
        let mut s = set(TWO_RULES, Config::default());
        s.replace_n(40);
        let events: Vec<_> = s.events().cloned().collect();
        (events, s.expressions())
    };
    assert_eq!(run(), run());
}

#[test]
fn rule_order() {
    let mut s = set(TWO_RULES, Config::default());
    s.replace_n(10);
    let rules: Vec<_> = s.events().map(|e| e.rule).collect();
    // every growth event creates a loop that is reduced by the next event
    assert_eq!(rules, [1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);
}

#[test]
fn fixed_point_idempotence() {
    let mut s = set("rule {x, y}, {y, z} -> {x, z}. init {1, 2}, {2, 3}, {3, 4}, {5, 6}.", Config::default());
    assert_eq!(s.replace_n(100), 2);
    let before = s.expressions();
    for _ in 0..3 {
        assert_eq!(s.replace(), 0);
    }
    assert_eq!(s.expressions(), before);
    assert_eq!(before, [[5, 6], [1, 4]]);
}

#[test]
fn max_generation() {
    let config = Config {
        max_generation: Some(2),
        ..Config::default()
    };
    let mut s = set(GROWTH, config);
    let applied = s.replace_n(1000);
    assert!(applied < 1000);
    assert!(s.history().all(|(_, e)| e.generation <= 2));
    assert!(s.events().any(|e| e.generation == 2));
}

#[test]
fn initial_expressions() {
    let s = set("rule {x} -> . init {3, 1}, {}, {2}.", Config::default());
    assert_eq!(s.expressions(), [vec![3, 1], vec![], vec![2]]);
    assert!(s.history().all(|(_, e)| e.created_by == INITIAL_EVENT && e.is_active()));
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_matches_sequential() {
    let run = |parallel| {
        let config = Config {
            parallel,
            ..Config::default()
        };
        let mut s = set(TWO_RULES, config);
        s.replace_n(25);
        s.events().cloned().collect::<Vec<_>>()
    };
    assert_eq!(run(true), run(false));
}
