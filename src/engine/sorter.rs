//! Stepwise sort engine.
//!
//! Each algorithm is an explicit resumable state machine: its loop cursors
//! live in fields, and [`Stepper::advance`] runs the algorithm until the next
//! visible mutation (a swap or a shift) and then returns. Comparisons that
//! move nothing are consumed inside the same call.
//!
//! The engine never holds on to the sequence. Every call borrows it through
//! the narrow [`SortTarget`] interface, so the renderer can read the same
//! sequence between frames.

use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};

/// Mutation interface the engine needs from a sequence container.
pub trait SortTarget {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds-checked read.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    fn value_at(&self, index: usize) -> SortResult<i64>;

    /// Bounds-checked swap.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is `>= len`.
    fn set_pair(&mut self, i: usize, j: usize) -> SortResult<()>;
}

impl SortTarget for Vec<i64> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn value_at(&self, index: usize) -> SortResult<i64> {
        self.get(index)
            .copied()
            .ok_or_else(|| SortError::index_out_of_range(index, self.as_slice().len()))
    }

    fn set_pair(&mut self, i: usize, j: usize) -> SortResult<()> {
        let len = self.as_slice().len();
        for index in [i, j] {
            if index >= len {
                return Err(SortError::index_out_of_range(index, len));
            }
        }
        self.swap(i, j);
        Ok(())
    }
}

/// Requested ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Whether `left` must move past `right`. Strict, so equal values never move.
    #[must_use]
    pub const fn out_of_order(self, left: i64, right: i64) -> bool {
        match self {
            Self::Ascending => left > right,
            Self::Descending => left < right,
        }
    }

    /// Whether `values` is ordered for this direction.
    #[must_use]
    pub fn is_sorted(self, values: &[i64]) -> bool {
        values.windows(2).all(|w| !self.out_of_order(w[0], w[1]))
    }
}

/// Sort algorithm choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Adjacent-exchange passes.
    #[default]
    Bubble,
    /// Shift each element left into the sorted prefix.
    Insertion,
    /// Reserved; has no step generator.
    Quick,
}

impl Algorithm {
    /// Algorithms offered in the control panel, in display order.
    pub const SELECTABLE: [Self; 2] = [Self::Bubble, Self::Insertion];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Insertion => "Insertion Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Whether a step generator exists for this algorithm.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        !matches!(self, Self::Quick)
    }

    /// Next entry of [`Self::SELECTABLE`], wrapping around.
    #[must_use]
    pub fn next_selectable(self) -> Self {
        let position = Self::SELECTABLE.iter().position(|&a| a == self);
        position.map_or(Self::SELECTABLE[0], |p| {
            Self::SELECTABLE[(p + 1) % Self::SELECTABLE.len()]
        })
    }
}

/// Result of one `advance()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The two indices written by this step, lower index first.
    Progressed(usize, usize),
    /// The run is complete. Terminal and idempotent.
    Done,
}

impl StepOutcome {
    /// The highlight pair, if any.
    #[must_use]
    pub const fn pair(self) -> Option<(usize, usize)> {
        match self {
            Self::Progressed(i, j) => Some((i, j)),
            Self::Done => None,
        }
    }

    /// Whether this is the terminal outcome.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A resumable unit of sorting work.
pub trait Stepper {
    /// Apply work up to and including the next visible mutation.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the target shrank underneath the run.
    fn advance<T: SortTarget + ?Sized>(&mut self, target: &mut T) -> SortResult<StepOutcome>;

    /// Whether `advance` will only ever return `Done` from now on.
    fn is_done(&self) -> bool;
}

/// Bubble sort with its pass and comparison cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleStepper {
    direction: Direction,
    pass: usize,
    inner: usize,
    done: bool,
}

impl BubbleStepper {
    /// Start a traversal in `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            pass: 0,
            inner: 0,
            done: false,
        }
    }
}

impl Stepper for BubbleStepper {
    fn advance<T: SortTarget + ?Sized>(&mut self, target: &mut T) -> SortResult<StepOutcome> {
        if self.done {
            return Ok(StepOutcome::Done);
        }

        let n = target.len();
        while self.pass + 1 < n {
            let limit = n - 1 - self.pass;
            while self.inner < limit {
                let j = self.inner;
                self.inner += 1;

                let left = target.value_at(j)?;
                let right = target.value_at(j + 1)?;
                if self.direction.out_of_order(left, right) {
                    target.set_pair(j, j + 1)?;
                    return Ok(StepOutcome::Progressed(j, j + 1));
                }
            }
            self.pass += 1;
            self.inner = 0;
        }

        self.done = true;
        Ok(StepOutcome::Done)
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

/// Element currently being carried left by insertion sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Carry {
    position: usize,
    value: i64,
}

/// Insertion sort with its outer cursor and the element in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionStepper {
    direction: Direction,
    outer: usize,
    carry: Option<Carry>,
    done: bool,
}

impl InsertionStepper {
    /// Start a traversal in `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            outer: 1,
            carry: None,
            done: false,
        }
    }
}

impl Stepper for InsertionStepper {
    fn advance<T: SortTarget + ?Sized>(&mut self, target: &mut T) -> SortResult<StepOutcome> {
        if self.done {
            return Ok(StepOutcome::Done);
        }

        let n = target.len();
        let direction = self.direction;
        loop {
            let carry = match self.carry {
                Some(carry) => carry,
                None => {
                    if self.outer >= n {
                        self.done = true;
                        return Ok(StepOutcome::Done);
                    }
                    let carry = Carry {
                        position: self.outer,
                        value: target.value_at(self.outer)?,
                    };
                    self.outer += 1;
                    carry
                }
            };

            if carry.position > 0 {
                let previous = target.value_at(carry.position - 1)?;
                if direction.out_of_order(previous, carry.value) {
                    // The carried value always sits at `position`, so a
                    // shift plus placement is a swap with its neighbour.
                    let placed = carry.position - 1;
                    target.set_pair(placed, carry.position)?;
                    self.carry = Some(Carry {
                        position: placed,
                        value: carry.value,
                    });
                    return Ok(StepOutcome::Progressed(placed, placed + 1));
                }
            }
            self.carry = None;
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RunState {
    Bubble(BubbleStepper),
    Insertion(InsertionStepper),
    Done,
}

/// One in-progress traversal binding an algorithm and a direction.
///
/// Dropping the run is the only cancellation; the sequence keeps whatever
/// partially sorted order it reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRun {
    algorithm: Algorithm,
    direction: Direction,
    steps: u64,
    state: RunState,
}

impl SortRun {
    /// Create a run. Direction is fixed for the lifetime of the run.
    ///
    /// # Errors
    ///
    /// Returns `NotImplemented` for [`Algorithm::Quick`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortviz::engine::sorter::{Algorithm, Direction, SortRun, StepOutcome, Stepper};
    ///
    /// let mut values = vec![5, 3, 4, 1, 2];
    /// let mut run = SortRun::new(Algorithm::Bubble, Direction::Ascending).unwrap();
    /// assert_eq!(run.advance(&mut values).unwrap(), StepOutcome::Progressed(0, 1));
    /// run.run_to_completion(&mut values).unwrap();
    /// assert_eq!(values, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn new(algorithm: Algorithm, direction: Direction) -> SortResult<Self> {
        let state = match algorithm {
            Algorithm::Bubble => RunState::Bubble(BubbleStepper::new(direction)),
            Algorithm::Insertion => RunState::Insertion(InsertionStepper::new(direction)),
            Algorithm::Quick => return Err(SortError::NotImplemented(Algorithm::Quick.name())),
        };
        Ok(Self {
            algorithm,
            direction,
            steps: 0,
            state,
        })
    }

    /// Algorithm this run executes.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Direction this run sorts in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of `Progressed` events emitted so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Drive the run until `Done`, returning the total step count.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Stepper::advance`].
    pub fn run_to_completion<T: SortTarget + ?Sized>(&mut self, target: &mut T) -> SortResult<u64> {
        while !self.advance(target)?.is_done() {}
        Ok(self.steps)
    }
}

impl Stepper for SortRun {
    fn advance<T: SortTarget + ?Sized>(&mut self, target: &mut T) -> SortResult<StepOutcome> {
        let outcome = match &mut self.state {
            RunState::Bubble(stepper) => stepper.advance(target)?,
            RunState::Insertion(stepper) => stepper.advance(target)?,
            RunState::Done => StepOutcome::Done,
        };

        match outcome {
            StepOutcome::Progressed(..) => self.steps += 1,
            StepOutcome::Done => self.state = RunState::Done,
        }
        Ok(outcome)
    }

    fn is_done(&self) -> bool {
        matches!(self.state, RunState::Done)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn inversions(values: &[i64], direction: Direction) -> u64 {
        let mut count = 0;
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                if direction.out_of_order(values[i], values[j]) {
                    count += 1;
                }
            }
        }
        count
    }

    fn any_algorithm() -> impl Strategy<Value = Algorithm> {
        prop_oneof![Just(Algorithm::Bubble), Just(Algorithm::Insertion)]
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
    }

    proptest! {
        #[test]
        fn prop_result_is_sorted_permutation(
            values in proptest::collection::vec(-100i64..100, 0..60),
            algorithm in any_algorithm(),
            direction in any_direction(),
        ) {
            let mut sorted = values.clone();
            let mut run = SortRun::new(algorithm, direction)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            run.run_to_completion(&mut sorted)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert!(direction.is_sorted(&sorted));

            let mut expected = values;
            expected.sort_unstable();
            if direction == Direction::Descending {
                expected.reverse();
            }
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn prop_step_count_equals_inversions(
            values in proptest::collection::vec(0i64..20, 0..40),
            algorithm in any_algorithm(),
            direction in any_direction(),
        ) {
            let n = values.len() as u64;
            let expected = inversions(&values, direction);
            let mut work = values;
            let mut run = SortRun::new(algorithm, direction)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let steps = run.run_to_completion(&mut work)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(steps, expected);
            prop_assert!(steps <= n * n.saturating_sub(1) / 2);
            if n <= 1 {
                prop_assert_eq!(steps, 0);
            }
        }

        #[test]
        fn prop_highlight_matches_mutation(
            values in proptest::collection::vec(-10i64..10, 0..30),
            algorithm in any_algorithm(),
            direction in any_direction(),
        ) {
            let mut work = values;
            let mut run = SortRun::new(algorithm, direction)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            loop {
                let before = work.clone();
                let outcome = run.advance(&mut work)
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                match outcome {
                    StepOutcome::Done => {
                        prop_assert_eq!(&before, &work);
                        break;
                    }
                    StepOutcome::Progressed(i, j) => {
                        prop_assert_eq!(j, i + 1);
                        let changed: Vec<usize> = (0..work.len())
                            .filter(|&k| before[k] != work[k])
                            .collect();
                        prop_assert_eq!(changed, vec![i, j]);
                        prop_assert_eq!(work[i], before[j]);
                        prop_assert_eq!(work[j], before[i]);
                    }
                }
            }
        }

        #[test]
        fn prop_done_is_terminal(
            values in proptest::collection::vec(-10i64..10, 0..20),
            algorithm in any_algorithm(),
            extra_calls in 1usize..5,
        ) {
            let mut work = values;
            let mut run = SortRun::new(algorithm, Direction::Ascending)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            run.run_to_completion(&mut work)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let snapshot = work.clone();
            for _ in 0..extra_calls {
                let outcome = run.advance(&mut work)
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(outcome, StepOutcome::Done);
            }
            prop_assert_eq!(work, snapshot);
        }
    }
}
