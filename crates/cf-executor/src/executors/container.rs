//! Executor that runs a container component through a container runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cf_component::{ContainerComponent, ResolutionContext};
use cf_core::config::RuntimeConfig;
use cf_core::{ArtifactMap, Error, ExecProperties, Result};

use crate::base::ExecutorBase;
use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use crate::executor::{ExecutionResult, Executor, ExecutorOutput};

/// How containers are launched: `<program> <run_args...> <image> <command...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRuntime {
    pub program: PathBuf,
    pub run_args: Vec<String>,
    pub timeout: Duration,
}

impl Default for ContainerRuntime {
    fn default() -> Self {
        Self {
            program: PathBuf::from("docker"),
            run_args: vec!["run".into(), "--rm".into()],
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ContainerRuntime {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            program: config.program.clone(),
            run_args: config.run_args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Build the launch command for `image` with an already resolved
    /// container command.
    pub fn command_line(&self, image: &str, resolved: &[String]) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.program.clone());
        cmd.args(self.run_args.iter().cloned())
            .arg(image)
            .args(resolved.iter().cloned())
            .timeout(self.timeout);
        cmd
    }
}

/// Runs a [`ContainerComponent`] with its placeholders bound to the step's
/// artifacts and execution properties.
#[derive(Debug, Clone)]
pub struct ContainerExecutor {
    component: Arc<ContainerComponent>,
    runtime: ContainerRuntime,
    base: ExecutorBase,
    dry_run: bool,
}

impl ContainerExecutor {
    pub fn new(
        component: Arc<ContainerComponent>,
        runtime: ContainerRuntime,
        base: ExecutorBase,
    ) -> Self {
        Self {
            component,
            runtime,
            base,
            dry_run: false,
        }
    }

    /// Log the command instead of launching it.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn component(&self) -> &ContainerComponent {
        &self.component
    }

    pub fn base(&self) -> &ExecutorBase {
        &self.base
    }

    /// Substitute every placeholder of the component's command.
    pub fn resolve_command(
        &self,
        inputs: &ArtifactMap,
        outputs: &ArtifactMap,
        exec_properties: &ExecProperties,
    ) -> Result<Vec<String>> {
        self.check_parameter_types(exec_properties)?;
        ResolutionContext::new(inputs, outputs, exec_properties)
            .resolve(&self.component.executor_spec().command)
    }

    fn check_parameter_types(&self, exec_properties: &ExecProperties) -> Result<()> {
        for (name, declared) in &self.component.spec().parameters {
            if let Some(value) = exec_properties.get(name) {
                if value.property_type() != *declared {
                    return Err(Error::execution(
                        self.base.name(),
                        format!(
                            "parameter '{name}' expects {declared} but got {}",
                            value.property_type()
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Executor for ContainerExecutor {
    fn name(&self) -> &str {
        self.base.name()
    }

    async fn execute(
        &self,
        inputs: &ArtifactMap,
        outputs: &ArtifactMap,
        exec_properties: &ExecProperties,
    ) -> Result<Option<ExecutorOutput>> {
        let resolved = self.resolve_command(inputs, outputs, exec_properties)?;
        let image = &self.component.executor_spec().image;
        let cmd = self.runtime.command_line(image, &resolved);

        let message = if self.dry_run {
            tracing::info!(component = %self.component.name(), "Dry run: {}", cmd.display());
            cmd.display()
        } else {
            tracing::info!(component = %self.component.name(), "Launching container: {}", cmd.display());
            let output = cmd.execute().await?;
            tracing::debug!(stderr = %output.stderr.trim(), "Container finished");
            output.stdout.trim().to_string()
        };

        Ok(Some(ExecutorOutput {
            output_artifacts: outputs.clone(),
            execution_properties: ExecProperties::new(),
            result: Some(ExecutionResult { code: 0, message }),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_component::{create_container_component, CommandArg, Placeholder};
    use cf_core::{
        Artifact, ArtifactType, ArtifactTypeMap, PropertyType, PropertyTypeMap, PropertyValue,
    };

    fn component() -> Arc<ContainerComponent> {
        let mut inputs = ArtifactTypeMap::new();
        inputs.insert("examples".into(), ArtifactType::DATASET);
        let mut outputs = ArtifactTypeMap::new();
        outputs.insert("model".into(), ArtifactType::MODEL);
        let mut params = PropertyTypeMap::new();
        params.insert("epochs".into(), PropertyType::Int);

        Arc::new(
            create_container_component(
                "trainer",
                "trainer-image:1.0",
                vec![
                    CommandArg::literal("train"),
                    Placeholder::input_uri("examples").unwrap().into(),
                    Placeholder::output_uri("model").unwrap().into(),
                    Placeholder::input_value("epochs").unwrap().into(),
                ],
                inputs,
                outputs,
                params,
            )
            .unwrap(),
        )
    }

    fn bindings() -> (ArtifactMap, ArtifactMap, ExecProperties) {
        let mut inputs = ArtifactMap::new();
        inputs.insert(
            "examples".into(),
            vec![Artifact::new(&ArtifactType::DATASET, "/data/examples")],
        );
        let mut outputs = ArtifactMap::new();
        outputs.insert(
            "model".into(),
            vec![Artifact::new(&ArtifactType::MODEL, "/out/model")],
        );
        let mut props = ExecProperties::new();
        props.insert("epochs".into(), PropertyValue::Int(5));
        (inputs, outputs, props)
    }

    fn echo_runtime() -> ContainerRuntime {
        ContainerRuntime {
            program: PathBuf::from("echo"),
            run_args: vec!["run".into()],
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn runtime_from_config() {
        let runtime = ContainerRuntime::from_config(&RuntimeConfig::default());
        assert_eq!(runtime, ContainerRuntime::default());
    }

    #[test]
    fn command_line_layout() {
        let cmd = ContainerRuntime::default()
            .command_line("alpine", &["echo".to_string(), "hi".to_string()]);
        assert_eq!(cmd.display(), "docker run --rm alpine echo hi");
    }

    #[test]
    fn resolves_all_placeholders() {
        let executor = ContainerExecutor::new(
            component(),
            echo_runtime(),
            ExecutorBase::new("trainer", None),
        );
        let (inputs, outputs, props) = bindings();
        let resolved = executor.resolve_command(&inputs, &outputs, &props).unwrap();
        assert_eq!(resolved, vec!["train", "/data/examples", "/out/model", "5"]);
    }

    #[test]
    fn parameter_type_mismatch_is_execution_error() {
        let executor = ContainerExecutor::new(
            component(),
            echo_runtime(),
            ExecutorBase::new("trainer", None),
        );
        let (inputs, outputs, mut props) = bindings();
        props.insert("epochs".into(), PropertyValue::String("five".into()));
        let err = executor
            .resolve_command(&inputs, &outputs, &props)
            .unwrap_err();
        assert!(matches!(err, Error::Execution { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn dry_run_skips_launch() {
        let runtime = ContainerRuntime {
            program: PathBuf::from("nonexistent_runtime_xyz"),
            ..ContainerRuntime::default()
        };
        let executor =
            ContainerExecutor::new(component(), runtime, ExecutorBase::new("trainer", None))
                .dry_run(true);
        let (inputs, outputs, props) = bindings();
        let out = executor
            .execute(&inputs, &outputs, &props)
            .await
            .unwrap()
            .unwrap();
        let result = out.result.unwrap();
        assert_eq!(result.code, 0);
        assert!(result.message.contains("trainer-image:1.0 train /data/examples"));
        assert_eq!(out.output_artifacts, outputs);
    }

    #[tokio::test]
    async fn missing_binding_fails_before_launch() {
        let executor = ContainerExecutor::new(
            component(),
            echo_runtime(),
            ExecutorBase::new("trainer", None),
        );
        let (_, outputs, props) = bindings();
        let err = executor
            .execute(&ArtifactMap::new(), &outputs, &props)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }), "got: {err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_through_runtime() {
        let executor = ContainerExecutor::new(
            component(),
            echo_runtime(),
            ExecutorBase::new("trainer", None),
        );
        let (inputs, outputs, props) = bindings();
        let out = executor
            .execute(&inputs, &outputs, &props)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            out.result.unwrap().message,
            "run trainer-image:1.0 train /data/examples /out/model 5"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_runtime_is_tool_error() {
        let runtime = ContainerRuntime {
            program: PathBuf::from("false"),
            run_args: Vec::new(),
            timeout: Duration::from_secs(10),
        };
        let executor =
            ContainerExecutor::new(component(), runtime, ExecutorBase::new("trainer", None));
        let (inputs, outputs, props) = bindings();
        let err = executor
            .execute(&inputs, &outputs, &props)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Tool { .. }), "got: {err}");
    }
}
