// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::EngineConfig;
use crate::engine::{Control, Engine, IssueKind, Outcome};
use crate::errors::{ExecutionError, Resource};
use crate::traits::Transform;

struct ToText;

impl Transform for ToText {
    type In = i32;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut i32) -> anyhow::Result<()> {
        ctrl.emit(input.to_string());
        Ok(())
    }
}

/// Emits every permutation of its input in lexicographic order.
struct AllPermutations;

impl Transform for AllPermutations {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        let mut chars: Vec<char> = input.chars().collect();
        chars.sort_unstable();
        loop {
            ctrl.emit(chars.iter().collect());
            if !next_permutation(&mut chars) {
                return Ok(());
            }
        }
    }
}

fn next_permutation(chars: &mut [char]) -> bool {
    let Some(pivot) = (1..chars.len()).rev().find(|&i| chars[i - 1] < chars[i]) else {
        return false;
    };
    let swap_with = (pivot..chars.len())
        .rev()
        .find(|&i| chars[i] > chars[pivot - 1])
        .unwrap_or(pivot);
    chars.swap(pivot - 1, swap_with);
    chars[pivot..].reverse();
    true
}

/// Passes only strings starting with the given character.
struct StopUnless(char);

impl Transform for StopUnless {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        if input.starts_with(self.0) {
            ctrl.pass();
        }
        Ok(())
    }
}

struct Append(char);

impl Transform for Append {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        input.push(self.0);
        ctrl.emit(input.clone());
        Ok(())
    }
}

/// Emits `width` variants of its input.
struct Widen(usize);

impl Transform for Widen {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        for idx in 0..self.0 {
            ctrl.emit(format!("{}{}", input, idx));
        }
        Ok(())
    }
}

/// Replaces the first character with `_`.
struct QuoteOne;

impl Transform for QuoteOne {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        input.replace_range(..1, "_");
        ctrl.emit(input.clone());
        Ok(())
    }
}

/// Doubles its input, quoting the result downstream when it starts with `1`.
struct TimesTwo;

impl Transform for TimesTwo {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        let doubled = input.repeat(2);
        let mut path = ctrl.decl_path();
        if doubled.starts_with('1') {
            path.next(QuoteOne);
        }
        ctrl.emit(doubled);
        Ok(())
    }
}

/// Enumerates push/fold sequences of length 3, stopping early on "ff".
struct PushFold;

impl Transform for PushFold {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        if input == "ff" || input.len() == 3 {
            ctrl.pass();
            return Ok(());
        }
        ctrl.emit(format!("{}p", input));
        ctrl.emit(format!("{}f", input));
        ctrl.decl_path().next(PushFold);
        Ok(())
    }
}

/// Recurses forever, emitting `width` values per step.
struct Unbounded {
    width: usize,
}

impl Transform for Unbounded {
    type In = u64;
    type Out = u64;

    fn apply(&self, ctrl: &mut Control<'_, u64>, input: &mut u64) -> anyhow::Result<()> {
        for offset in 0..self.width as u64 {
            ctrl.emit(*input + offset);
        }
        ctrl.decl_path().next(Unbounded { width: self.width });
        Ok(())
    }
}

/// Returns its input when it is even, otherwise forwards it.
struct ReturnEven;

impl Transform for ReturnEven {
    type In = u64;
    type Out = u64;

    fn apply(&self, ctrl: &mut Control<'_, u64>, input: &mut u64) -> anyhow::Result<()> {
        if *input % 2 == 0 {
            ctrl.ret(*input);
        } else {
            ctrl.pass();
        }
        Ok(())
    }
}

struct Spread;

impl Transform for Spread {
    type In = u64;
    type Out = u64;

    fn apply(&self, ctrl: &mut Control<'_, u64>, input: &mut u64) -> anyhow::Result<()> {
        for offset in 0..4 {
            ctrl.emit(*input + offset);
        }
        Ok(())
    }
}

struct ParseDigits;

impl Transform for ParseDigits {
    type In = String;
    type Out = String;

    fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
        if input.contains('-') {
            ctrl.error(format!("'{}' has a sign, keeping it verbatim", input));
        }
        let value: i64 = input.parse()?;
        ctrl.emit(value.abs().to_string());
        Ok(())
    }
}

/// A set of numbers still to be combined, with the expression that built
/// each of them.
#[derive(Debug, Clone, PartialEq)]
struct Factorization {
    numbers: Vec<u64>,
    tokens: Vec<String>,
    target: u64,
}

impl Factorization {
    fn new(numbers: &[u64], target: u64) -> Self {
        Self {
            numbers: numbers.to_vec(),
            tokens: numbers.iter().map(u64::to_string).collect(),
            target,
        }
    }

    /// Replaces the numbers at `a` and `b` with their combination.
    fn combine(&self, a: usize, b: usize, op: char) -> Self {
        let mut next = Self {
            numbers: Vec::with_capacity(self.numbers.len() - 1),
            tokens: Vec::with_capacity(self.numbers.len() - 1),
            target: self.target,
        };
        for idx in (0..self.numbers.len()).filter(|&idx| idx != a && idx != b) {
            next.numbers.push(self.numbers[idx]);
            next.tokens.push(self.tokens[idx].clone());
        }
        let value = match op {
            '+' => self.numbers[a] + self.numbers[b],
            _ => self.numbers[a] * self.numbers[b],
        };
        next.numbers.push(value);
        next.tokens
            .push(format!("({}{}{})", self.tokens[a], op, self.tokens[b]));
        next
    }
}

/// Searches for an expression over all the numbers that hits the target.
struct Factorize;

impl Transform for Factorize {
    type In = Factorization;
    type Out = Factorization;

    fn apply(
        &self,
        ctrl: &mut Control<'_, Factorization>,
        input: &mut Factorization,
    ) -> anyhow::Result<()> {
        if input.numbers.len() == 1 {
            if input.numbers[0] == input.target {
                ctrl.ret(input.clone());
            }
            return Ok(());
        }

        for op in ['+', '*'] {
            for a in 0..input.numbers.len() {
                for b in a + 1..input.numbers.len() {
                    ctrl.emit(input.combine(a, b, op));
                }
            }
        }
        ctrl.decl_path().next(Factorize);
        Ok(())
    }
}

fn evaluate(token: &str) -> u64 {
    fn parse(chars: &[u8], pos: &mut usize) -> u64 {
        if chars[*pos] == b'(' {
            *pos += 1;
            let lhs = parse(chars, pos);
            let op = chars[*pos];
            *pos += 1;
            let rhs = parse(chars, pos);
            *pos += 1;
            return if op == b'+' { lhs + rhs } else { lhs * rhs };
        }
        let start = *pos;
        while *pos < chars.len() && chars[*pos].is_ascii_digit() {
            *pos += 1;
        }
        std::str::from_utf8(&chars[start..*pos])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0)
    }
    parse(token.as_bytes(), &mut 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations_filtered_by_first_char() {
        let mut engine = Engine::default();
        engine
            .start()
            .next(ToText)
            .next(AllPermutations)
            .next(StopUnless('2'));

        let execution = engine.execute::<String>(241_i32).unwrap();

        assert_eq!(execution.results, vec!["214", "241"]);
        assert!(!execution.has_errors());
        assert_eq!(execution.outcome, Outcome::Completed);
    }

    #[test]
    fn test_empty_graph_returns_initial_value() {
        let mut engine = Engine::default();

        let results = engine
            .execute::<String>(String::from("seed"))
            .unwrap()
            .into_results();

        assert_eq!(results, vec!["seed"]);
    }

    #[test]
    fn test_chained_modifiers_apply_in_sequence() {
        let mut engine = Engine::default();
        let mut path = engine.start();
        for c in "thicket".chars() {
            path = path.then(Append(c));
        }

        let execution = engine.execute::<String>(String::new()).unwrap();

        assert_eq!(execution.results, vec!["thicket"]);
        assert_eq!(execution.stats.max_depth, 7);
        assert_eq!(execution.stats.invocations, 7);
    }

    #[test]
    fn test_fan_out_multiplies() {
        let mut engine = Engine::default();
        engine.start().next(Widen(3)).next(Widen(2));

        let results = engine
            .execute::<String>(String::from("x"))
            .unwrap()
            .into_results();

        assert_eq!(results, vec!["x00", "x01", "x10", "x11", "x20", "x21"]);
    }

    #[test]
    fn test_mismatched_input_is_pruned_with_diagnostic() {
        let mut engine = Engine::default();
        engine.start().next(ToText).next(AllPermutations);

        let execution = engine.execute::<String>(String::from("241")).unwrap();

        assert!(execution.results.is_empty());
        assert_eq!(execution.diagnostics.len(), 1);
        let diagnostic = &execution.diagnostics[0];
        assert_eq!(diagnostic.kind, IssueKind::Rejected);
        assert_eq!(diagnostic.transform, "ToText");
        assert_eq!(
            diagnostic.message,
            "Bad cast, expected i32, but got alloc::string::String"
        );
    }

    #[test]
    fn test_mismatch_only_prunes_its_own_branch() {
        let mut engine = Engine::default();
        {
            let mut head = engine.start();
            head.next(ToText);
            head.next(Append('!'));
        }

        let execution = engine.execute::<String>(String::from("hi")).unwrap();

        assert_eq!(execution.results, vec!["hi!"]);
        assert_eq!(execution.errors().count(), 1);
    }

    #[test]
    fn test_first_return_short_circuits() {
        let mut engine = Engine::default();
        engine.start().next(Spread).next(ReturnEven);

        let execution = engine.execute::<u64>(1_u64).unwrap();

        assert_eq!(execution.results, vec![2]);
        assert!(execution.is_short_circuited());
    }

    #[test]
    fn test_aggregated_returns_keep_searching() {
        let mut engine = Engine::new(EngineConfig::default().with_aggregate_returns(true));
        engine.start().next(Spread).next(ReturnEven);

        let execution = engine.execute::<u64>(1_u64).unwrap();

        // 1 and 3 pass through to the terminal node; 2 and 4 are returned
        assert_eq!(execution.results, vec![1, 2, 3, 4]);
        assert_eq!(execution.outcome, Outcome::Completed);
    }

    #[test]
    fn test_aggregated_returns_without_terminal_values() {
        let config = EngineConfig::default()
            .with_aggregate_returns(true)
            .with_collect_terminal_values(false);
        let mut engine = Engine::new(config);
        engine.start().next(Spread).next(ReturnEven);

        let results = engine.execute::<u64>(1_u64).unwrap().into_results();

        assert_eq!(results, vec![2, 4]);
    }

    #[test]
    fn test_fan_out_recursion_exhausts_queue() {
        let mut engine = Engine::new(EngineConfig::default().with_max_queue_len(50));
        engine.start().next(Unbounded { width: 2 });

        let err = engine.execute::<u64>(0_u64).unwrap_err();

        match err {
            ExecutionError::ResourceExhausted {
                resource,
                limit,
                observed,
            } => {
                assert_eq!(resource, Resource::QueueLength);
                assert_eq!(limit, 50);
                assert_eq!(observed, 51);
            }
            other => panic!("expected ResourceExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_linear_recursion_exhausts_depth() {
        let mut engine = Engine::new(EngineConfig::default().with_max_depth(25));
        engine.start().next(Unbounded { width: 1 });

        let err = engine.execute::<u64>(0_u64).unwrap_err();

        assert_eq!(
            err,
            ExecutionError::ResourceExhausted {
                resource: Resource::Depth,
                limit: 25,
                observed: 26,
            }
        );
        assert!(err.is_resource_exhausted());
    }

    #[test]
    fn test_default_limits_stop_unbounded_recursion() {
        let mut engine = Engine::default();
        engine.start().next(Unbounded { width: 1 });

        let err = engine.execute::<u64>(0_u64).unwrap_err();

        assert!(err.is_resource_exhausted());
    }

    #[test]
    fn test_dynamic_extension_routes_emissions() {
        let mut engine = Engine::default();
        engine
            .start()
            .next(ToText)
            .next(AllPermutations)
            .next(TimesTwo);

        let execution = engine.execute::<String>(12_i32).unwrap();

        // "1212" is quoted by the stage TimesTwo attached, "2121" lands on a
        // bare extension node and is collected there
        assert_eq!(execution.results, vec!["_212", "2121"]);
        assert_eq!(execution.stats.extensions, 2);
    }

    #[test]
    fn test_push_fold_enumeration() {
        let mut engine = Engine::default();
        engine.start().next(PushFold);

        let execution = engine.execute::<String>(String::new()).unwrap();

        assert_eq!(
            execution.results,
            vec!["ppp", "ppf", "pfp", "pff", "fpp", "fpf", "ff"]
        );
        assert_eq!(execution.stats.max_depth, 4);
    }

    #[test]
    fn test_failed_apply_and_reported_errors() {
        let mut engine = Engine::default();
        engine.start().next(ParseDigits);

        let execution = engine.execute::<String>(String::from("-17")).unwrap();
        assert_eq!(execution.results, vec!["17"]);
        assert_eq!(execution.diagnostics[0].kind, IssueKind::Reported);

        let execution = engine.execute::<String>(String::from("seventeen")).unwrap();
        assert!(execution.results.is_empty());
        assert_eq!(execution.diagnostics.len(), 1);
        assert_eq!(execution.diagnostics[0].kind, IssueKind::Failed);
    }

    #[test]
    fn test_factorization_finds_target() {
        let mut engine = Engine::default();
        engine.start().next(Factorize);

        let found = engine
            .execute_single::<Factorization>(Factorization::new(&[3, 4, 2, 5], 70))
            .unwrap();

        assert_eq!(found.numbers, vec![70]);
        assert_eq!(evaluate(&found.tokens[0]), 70);
        for digit in ['3', '4', '2', '5'] {
            assert!(found.tokens[0].contains(digit));
        }
    }

    #[test]
    fn test_factorization_aggregates_every_solution() {
        let mut engine = Engine::new(EngineConfig::default().with_aggregate_returns(true));
        engine.start().next(Factorize);

        let execution = engine
            .execute::<Factorization>(Factorization::new(&[3, 4, 2, 5], 70))
            .unwrap();

        assert!(execution.results.len() > 1);
        for solution in &execution.results {
            assert_eq!(evaluate(&solution.tokens[0]), 70);
        }
        let unreachable = engine
            .execute::<Factorization>(Factorization::new(&[2, 2], 7))
            .unwrap();
        assert!(unreachable.results.is_empty());
    }

    #[test]
    fn test_evaluate_fixture() {
        assert_eq!(evaluate("((2*(3+4))*5)"), 70);
        assert_eq!(evaluate("9"), 9);
    }
}
