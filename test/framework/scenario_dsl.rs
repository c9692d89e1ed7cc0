//! # Scenario DSL
//!
//! A builder API for Given-When-Then election scenarios.
//!
//! ## Example
//!
//! ```rust,ignore
//! Scenario::new("Single verified candidate wins")
//!     .given(|ctx| {
//!         ctx.harness.add_positions(&["Mayor"]);
//!         ctx.harness.start_registration();
//!         let peter = ctx.harness.register_voter("Peter", 23, "37948012");
//!         ctx.voters.push(peter);
//!     })
//!     .when("Peter votes", |ctx| {
//!         ctx.harness.vote(&ctx.voters[0], "Mayor", 0);
//!     })
//!     .then("the tally is one", |ctx| {
//!         assert_eq!(ctx.harness.votes_for("37948012"), 1);
//!     })
//!     .run();
//! ```

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;
use voting::ElectionConfig;

use super::invariants::InvariantSet;
use super::{ElectionTestHarness, TestEnv};

// ── Scenario Context ─────────────────────────────────────────────────────────

/// Mutable context passed to scenario steps.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a ElectionTestHarness<'b>,
    /// Voter wallets registered by earlier steps.
    pub voters: Vec<Address>,
    /// Named values shared between steps.
    pub data: std::collections::HashMap<String, i128>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a ElectionTestHarness<'b>) -> Self {
        Self {
            harness,
            voters: Vec::new(),
            data: std::collections::HashMap::new(),
        }
    }

    pub fn store(&mut self, key: &str, value: i128) {
        self.data.insert(key.into(), value);
    }

    /// Retrieve a value stored by a previous step.
    pub fn load(&self, key: &str) -> i128 {
        *self
            .data
            .get(key)
            .unwrap_or_else(|| panic!("Scenario variable '{}' not found", key))
    }
}

// ── Step Types ───────────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

struct Step {
    description: String,
    action: StepFn,
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

/// Steps are collected via the builder and executed in order by `run()`.
/// Invariants, if attached, are checked between the When and Then phases.
pub struct Scenario {
    name: String,
    config: ElectionConfig,
    given_steps: Vec<StepFn>,
    when_steps: Vec<Step>,
    then_steps: Vec<Step>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            config: ElectionConfig::default(),
            given_steps: Vec::new(),
            when_steps: Vec::new(),
            then_steps: Vec::new(),
            invariants: None,
        }
    }

    pub fn with_config(mut self, config: ElectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn given<F>(mut self, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.given_steps.push(Box::new(action));
        self
    }

    pub fn when<F>(mut self, description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.when_steps.push(Step {
            description: description.into(),
            action: Box::new(action),
        });
        self
    }

    pub fn then<F>(mut self, description: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.then_steps.push(Step {
            description: description.into(),
            action: Box::new(assertion),
        });
        self
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Deploy a fresh contract and run every step in order.
    ///
    /// Panics on the first failing step, naming it.
    pub fn run(self) {
        let mut env = TestEnv::new();
        let harness = ElectionTestHarness::new(&mut env, self.config);
        let mut ctx = ScenarioContext::new(&harness);

        for step in self.given_steps {
            step(&mut ctx);
        }

        for step in self.when_steps {
            run_step(&self.name, "when", step, &mut ctx);
        }

        if let Some(ref invariants) = self.invariants {
            let violations = invariants.check_all(&harness.snapshot());
            if !violations.is_empty() {
                let mut report = std::format!(
                    "Scenario '{}': invariant violations after actions:\n",
                    self.name
                );
                for (name, msg) in &violations {
                    report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
                }
                panic!("{}", report);
            }
        }

        for step in self.then_steps {
            run_step(&self.name, "then", step, &mut ctx);
        }
    }
}

fn run_step(scenario: &str, kind: &str, step: Step, ctx: &mut ScenarioContext<'_, '_>) {
    let description = step.description;
    let action = step.action;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| action(ctx)));
    if let Err(cause) = result {
        std::eprintln!("Scenario '{}' failed at {} '{}'", scenario, kind, description);
        std::panic::resume_unwind(cause);
    }
}

// ── Assertion Helpers ────────────────────────────────────────────────────────

/// Assert that a `try_*` call fails with the expected contract error.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(
                e, $expected,
                "Expected error {:?}, got {:?}",
                $expected, e
            ),
            Err(Err(e)) => panic!("Unexpected SDK error: {:?}", e),
            Ok(_) => panic!("Expected error {:?}, but operation succeeded", $expected),
        }
    };
}

// ── Batch Scenario Runner ────────────────────────────────────────────────────

/// Run several scenarios, returning `(passed, failed)`.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let total = scenarios.len();
    let mut failures = 0;

    for scenario in scenarios {
        let name = scenario.name.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scenario.run();
        }));

        match result {
            Ok(()) => std::eprintln!("  ✓ {}", name),
            Err(_) => {
                std::eprintln!("  ✗ {}", name);
                failures += 1;
            }
        }
    }

    (total - failures, failures)
}
