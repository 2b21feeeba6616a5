use std::path::Path;

use aoc_eval::{solve, OrbitOptions};

fn run(day: u8, part: u8, file: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("inputs").join(file);
    let input = std::fs::read_to_string(&path).unwrap();
    solve(day, part, &input, &OrbitOptions::default()).unwrap()
}

#[test]
fn day6_examples() {
    assert_eq!(run(6, 1, "day6test1.in"), "42");
    assert_eq!(run(6, 2, "day6test2.in"), "4");
}

#[test]
fn day6_full() {
    assert_eq!(run(6, 1, "day6.in"), "224901");
    assert_eq!(run(6, 2, "day6.in"), "334");
}

#[test]
fn day14_examples() {
    assert_eq!(run(14, 1, "day14test1.in"), "165");
    assert_eq!(run(14, 2, "day14test2.in"), "208");
}

#[test]
fn day14_full() {
    assert_eq!(run(14, 1, "day14.in"), "15919415426101");
    assert_eq!(run(14, 2, "day14.in"), "3443997590975");
}
