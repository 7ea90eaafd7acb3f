mod cli;

use componentforge::bindings::{BindingArgs, Bindings};
use componentforge::config::{self, Config};

use anyhow::{Context, Result};
use cf_component::{ContainerComponent, ResolutionContext};
use cf_executor::{
    run_executor, ContainerExecutor, ContainerRuntime, DirectEngine, ExecutorBase,
    ExecutorContext,
};
use clap::Parser;
use cli::{BindingOpts, Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    // RUST_LOG wins, then --verbose, then the configured level.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "componentforge=debug,cf_core=debug,cf_component=debug,cf_kfp=debug,cf_executor=debug"
                .to_string()
        } else {
            config.logging.effective_level().to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    match cli.command {
        Commands::Inspect { file, json } => inspect_component(&file, json),
        Commands::Normalize { file } => normalize_document(&file),
        Commands::Render { file, bindings } => render_command(&file, &bindings, &config),
        Commands::Run {
            file,
            bindings,
            dry_run,
            tmp_dir,
            output_json,
        } => run_component(
            &file,
            &bindings,
            &config,
            dry_run,
            tmp_dir,
            output_json,
        ),
        Commands::ValidateConfig {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("componentforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_component(file: &Path) -> Result<ContainerComponent> {
    if !file.exists() {
        anyhow::bail!("Component file does not exist: {:?}", file);
    }
    cf_kfp::load_component_yaml(file)
        .with_context(|| format!("Failed to load component from {:?}", file))
}

fn binding_args(opts: &BindingOpts) -> BindingArgs<'_> {
    BindingArgs {
        inputs: &opts.inputs,
        values: &opts.values,
        outputs: &opts.outputs,
        params: &opts.params,
    }
}

fn inspect_component(file: &Path, json: bool) -> Result<()> {
    let component = load_component(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&component)?);
        return Ok(());
    }

    let spec = component.spec();
    let executor_spec = component.executor_spec();
    println!("Component: {}", spec.name);
    println!("Image: {}", executor_spec.image);
    let command: Vec<String> = executor_spec
        .command
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Command: {}", command.join(" "));

    println!("\nInputs: {}", spec.inputs.len());
    for (name, ty) in &spec.inputs {
        println!("  {}: {}", name, ty);
    }

    println!("\nOutputs: {}", spec.outputs.len());
    for (name, ty) in &spec.outputs {
        println!("  {}: {}", name, ty);
    }

    if !spec.parameters.is_empty() {
        println!("\nParameters: {}", spec.parameters.len());
        for (name, ty) in &spec.parameters {
            println!("  {}: {}", name, ty);
        }
    }

    Ok(())
}

fn normalize_document(file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read component file: {:?}", file))?;
    let doc = cf_kfp::normalized_document(&contents)
        .with_context(|| format!("Failed to parse component file: {:?}", file))?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn render_command(file: &Path, opts: &BindingOpts, config: &Config) -> Result<()> {
    let component = load_component(file)?;
    let bindings = Bindings::from_args(&component, &binding_args(opts))?;

    let resolved = ResolutionContext::new(
        &bindings.inputs,
        &bindings.outputs,
        &bindings.exec_properties,
    )
    .resolve(&component.executor_spec().command)?;

    let runtime = ContainerRuntime::from_config(&config.runtime);
    println!(
        "{}",
        runtime
            .command_line(&component.executor_spec().image, &resolved)
            .display()
    );
    Ok(())
}

fn run_component(
    file: &Path,
    opts: &BindingOpts,
    config: &Config,
    dry_run: bool,
    tmp_dir: Option<PathBuf>,
    output_json: Option<PathBuf>,
) -> Result<()> {
    let component = Arc::new(load_component(file)?);
    let bindings = Bindings::from_args(&component, &binding_args(opts))?;

    let mut context = ExecutorContext::from_config(config);
    if let Some(dir) = tmp_dir {
        context = context.with_tmp_dir(dir);
    }
    if let Some(path) = output_json {
        context = context.with_executor_output_uri(path);
    }

    let mut base = ExecutorBase::new(component.name(), Some(Arc::new(context)));
    if config.engine.direct_engine {
        base = base.with_engine(Arc::new(DirectEngine::new()));
    }

    let executor = ContainerExecutor::new(
        Arc::clone(&component),
        ContainerRuntime::from_config(&config.runtime),
        base.clone(),
    )
    .dry_run(dry_run);

    tracing::info!("Running component {}", component.name());

    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(run_executor(
        &executor,
        &base,
        &bindings.inputs,
        &bindings.outputs,
        &bindings.exec_properties,
    ))?;

    if let Some(result) = output.and_then(|o| o.result) {
        if dry_run {
            println!("[DRY RUN] Would launch: {}", result.message);
        } else if !result.message.is_empty() {
            println!("{}", result.message);
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Log level: {}", config.logging.level);
    println!(
        "  Runtime: {} {}",
        config.runtime.program.display(),
        config.runtime.run_args.join(" ")
    );
    println!("  Timeout: {}s", config.runtime.timeout_secs);
    println!("  Direct engine: {}", config.engine.direct_engine);
    if let Some(ref dir) = config.executor.tmp_dir {
        println!("  Temp dir: {}", dir.display());
    }

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}
