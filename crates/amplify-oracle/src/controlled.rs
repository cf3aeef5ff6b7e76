//! Multi-controlled single-qubit operations.
//!
//! A k-controlled `U` is built without ancillas from controlled square
//! roots (Barenco et al., 1995, Lemma 7.5). With `V² = U`, `last` the
//! final control and `rest` the others:
//!
//! ```text
//! C^k(U) = C^{k-1}(V)[rest → target]
//!        · C^{k-1}(X)[rest → last]
//!        · C(V†)[last → target]
//!        · C^{k-1}(X)[rest → last]
//!        · C(V)[last → target]
//! ```
//!
//! (rightmost applied first). The `C^{k-1}` pieces recurse until a
//! single control remains, which becomes a two-qubit controlled gate.
//!
//! Gate names follow the operation name: a controlled `U` named `Z` is
//! `C-Z`, its root `C-SQRT-Z`, the root's adjoint `C-SQRT-Z-INV`, and the
//! ladder flips are `C-NOT`.

use tracing::{debug, instrument};

use amplify_ir::gate::INVERSE_SUFFIX;
use amplify_ir::{CustomGate, Program, QubitId, StandardGate, Unitary2x2};

use crate::config::SynthesisConfig;
use crate::error::{OracleError, OracleResult};

/// Prefix for controlled gate names.
pub const CONTROL_PREFIX: &str = "C";
/// Prefix for square-root gate names.
pub const SQRT_PREFIX: &str = "SQRT";
/// Name of the bit flip used in the control ladder.
pub const NOT_GATE_NAME: &str = "NOT";

/// Builds the program for a multi-controlled single-qubit operation.
///
/// Oracles take an implementation of this trait so the decomposition
/// strategy can be swapped without touching the oracle logic.
pub trait ControlledSynthesis: Send + Sync {
    /// Program applying `operation` to `target` iff every control is |1⟩.
    fn synthesize(
        &self,
        controls: &[QubitId],
        target: QubitId,
        operation: &Unitary2x2,
        gate_name: &str,
    ) -> OracleResult<Program>;
}

/// Ancilla-free recursive square-root construction.
#[derive(Debug, Clone, Default)]
pub struct RecursiveControlled {
    config: SynthesisConfig,
}

impl RecursiveControlled {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a validated configuration.
    pub fn with_config(config: SynthesisConfig) -> OracleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    fn recurse(
        &self,
        program: &mut Program,
        controls: &[QubitId],
        target: QubitId,
        operation: &Unitary2x2,
        gate_name: &str,
    ) -> OracleResult<()> {
        match controls {
            [] => self.uncontrolled(program, target, operation, gate_name),
            [control] => self.single_control(program, *control, target, operation, gate_name),
            [rest @ .., last] => {
                let root = operation.sqrt();
                let root_name = format!("{SQRT_PREFIX}-{gate_name}");
                let root_inv = root.dagger();
                let root_inv_name = format!("{root_name}{INVERSE_SUFFIX}");
                let not = Unitary2x2::x();

                self.recurse(program, &[*last], target, &root, &root_name)?;
                self.recurse(program, rest, *last, &not, NOT_GATE_NAME)?;
                self.recurse(program, &[*last], target, &root_inv, &root_inv_name)?;
                self.recurse(program, rest, *last, &not, NOT_GATE_NAME)?;
                self.recurse(program, rest, target, &root, &root_name)
            }
        }
    }

    fn uncontrolled(
        &self,
        program: &mut Program,
        target: QubitId,
        operation: &Unitary2x2,
        gate_name: &str,
    ) -> OracleResult<()> {
        let native = self
            .config
            .native_gates
            .then(|| StandardGate::matching_single_qubit(operation, self.config.tolerance))
            .flatten();
        match native {
            Some(gate) => program.gate(gate, [target])?,
            None => program.gate(CustomGate::single_qubit(gate_name, operation), [target])?,
        };
        Ok(())
    }

    fn single_control(
        &self,
        program: &mut Program,
        control: QubitId,
        target: QubitId,
        operation: &Unitary2x2,
        gate_name: &str,
    ) -> OracleResult<()> {
        let tol = self.config.tolerance;
        if self.config.native_gates {
            if operation.approx_eq(&Unitary2x2::x(), tol) {
                program.cx(control, target)?;
                return Ok(());
            }
            if operation.approx_eq(&Unitary2x2::z(), tol) {
                program.cz(control, target)?;
                return Ok(());
            }
        }
        let name = format!("{CONTROL_PREFIX}-{gate_name}");
        program.gate(CustomGate::controlled(name, operation), [control, target])?;
        Ok(())
    }
}

impl ControlledSynthesis for RecursiveControlled {
    #[instrument(skip(self, controls, target, operation), fields(num_controls = controls.len(), target = %target))]
    fn synthesize(
        &self,
        controls: &[QubitId],
        target: QubitId,
        operation: &Unitary2x2,
        gate_name: &str,
    ) -> OracleResult<Program> {
        if !operation.is_unitary(self.config.tolerance) {
            return Err(OracleError::NonUnitary {
                gate_name: gate_name.to_string(),
                tolerance: self.config.tolerance,
            });
        }
        if controls.contains(&target) {
            return Err(OracleError::InvalidArgument(format!(
                "target {target} is also listed as a control"
            )));
        }
        for (i, q) in controls.iter().enumerate() {
            if controls[..i].contains(q) {
                return Err(OracleError::InvalidArgument(format!(
                    "control {q} listed more than once"
                )));
            }
        }

        let mut program = Program::new();
        self.recurse(&mut program, controls, target, operation, gate_name)?;
        debug!(
            instructions = program.len(),
            defined_gates = program.defined_gates().len(),
            "Synthesized controlled operation"
        );
        Ok(program)
    }
}

/// Fluent front end over a [`ControlledSynthesis`].
///
/// ```rust
/// use amplify_ir::{QubitId, Unitary2x2};
/// use amplify_oracle::ControlledProgramBuilder;
///
/// let program = ControlledProgramBuilder::new()
///     .with_controls([QubitId(0), QubitId(1)])
///     .with_target(QubitId(2))
///     .with_operation(Unitary2x2::z())
///     .with_gate_name("Z")
///     .build()
///     .unwrap();
/// assert_eq!(program.len(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlledProgramBuilder {
    controls: Vec<QubitId>,
    target: Option<QubitId>,
    operation: Option<Unitary2x2>,
    gate_name: Option<String>,
}

impl ControlledProgramBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the control qubits.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// Set the target qubit.
    #[must_use]
    pub fn with_target(mut self, target: QubitId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the single-qubit operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Unitary2x2) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Set the name used for generated gates.
    #[must_use]
    pub fn with_gate_name(mut self, gate_name: impl Into<String>) -> Self {
        self.gate_name = Some(gate_name.into());
        self
    }

    /// Build with the default [`RecursiveControlled`] synthesis.
    pub fn build(&self) -> OracleResult<Program> {
        self.build_with(&RecursiveControlled::new())
    }

    /// Build with the given synthesis.
    pub fn build_with(&self, synthesis: &dyn ControlledSynthesis) -> OracleResult<Program> {
        let target = self
            .target
            .ok_or_else(|| OracleError::InvalidArgument("target qubit not set".into()))?;
        let operation = self
            .operation
            .as_ref()
            .ok_or_else(|| OracleError::InvalidArgument("operation not set".into()))?;
        let gate_name = self
            .gate_name
            .as_deref()
            .ok_or_else(|| OracleError::InvalidArgument("gate name not set".into()))?;
        synthesis.synthesize(&self.controls, target, operation, gate_name)
    }
}
