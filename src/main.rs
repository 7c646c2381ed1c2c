// ABOUTME: Entry point for the skafos CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skafos::arm::{DeploymentMonitor, EmbeddedTemplate, set_parameter, submit_deployment};
use skafos::chain::{DeploymentContext, StepKind, run_chain};
use skafos::cloud::{AzureClient, WebAppOps, verify_configuration};
use skafos::config::{self, Config};
use skafos::engine::{BollardEngine, RegistryAuth};
use skafos::error::{Error, Result};
use skafos::output::{Output, OutputMode};
use skafos::steps::{
    DockerBuildStep, DockerDeployStep, DockerPushStep, FtpDeployStep, GitDeployStep,
    RemoveImageStep, StepExecutor,
};
use skafos::transport::{CurlFtp, GitCli};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    let result = run(cli, Output::new(mode)).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command {
        Commands::Init {
            app,
            resource_group,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, app.as_deref(), resource_group.as_deref(), force)
        }
        Commands::Deploy { slot } => {
            let cwd = env::current_dir()?;
            let mut config = Config::discover(&cwd)?;

            if slot.is_some() {
                config.slot = slot;
            }

            deploy(config, output).await
        }
        Commands::Provision { parameters } => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;
            provision(config, parameters, output).await
        }
        Commands::Validate { timeout_secs } => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;
            let client = azure_client(&config)?;

            verify_configuration(&client, &config.app, Duration::from_secs(timeout_secs)).await?;

            output.success("Configuration is valid");
            Ok(())
        }
    }
}

/// Build the REST client from config and environment.
fn azure_client(config: &Config) -> Result<AzureClient> {
    let subscription = config
        .subscription
        .clone()
        .or_else(|| env::var("AZURE_SUBSCRIPTION_ID").ok())
        .ok_or_else(|| Error::MissingEnvVar("AZURE_SUBSCRIPTION_ID".to_string()))?;

    AzureClient::from_env(&subscription)
}

/// Registry push credentials from the environment, if present.
fn registry_auth(config: &Config) -> Option<RegistryAuth> {
    let username = env::var("REGISTRY_USERNAME").ok()?;
    let password = env::var("REGISTRY_PASSWORD").ok()?;

    Some(RegistryAuth {
        username,
        password,
        server: config.docker.as_ref().and_then(|d| d.registry.clone()),
    })
}

/// Deploy the application through its selected command chain.
async fn deploy(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();

    let client = Arc::new(azure_client(&config)?);

    output.progress(&format!(
        "Deploying {} ({})",
        config.app, config.resource_group
    ));

    let mut ctx = DeploymentContext::configure(client.as_ref(), config.clone()).await?;

    let mut executor = StepExecutor::new()
        .register(Box::new(FtpDeployStep::new(Arc::new(CurlFtp::new()))))
        .register(Box::new(GitDeployStep::new(Arc::new(GitCli::new()))));

    // The Docker engine is only needed (and only connected) for the
    // container publish path.
    if ctx.chain().contains(StepKind::DockerBuild) {
        let engine = Arc::new(BollardEngine::connect_local()?);
        let auth = registry_auth(&config);
        let web_client: Arc<dyn WebAppOps> = client.clone();

        executor = executor
            .register(Box::new(DockerBuildStep::new(engine.clone())))
            .register(Box::new(DockerPushStep::new(engine.clone(), auth)))
            .register(Box::new(DockerDeployStep::new(web_client)))
            .register(Box::new(RemoveImageStep::new(engine)));
    }

    run_chain(&mut ctx, &executor, &output).await?;

    output.success("Deployment complete!");
    Ok(())
}

/// Provision resources from the embedded template, then poll to completion.
async fn provision(config: Config, parameters: Vec<String>, mut output: Output) -> Result<()> {
    output.start_timer();

    let client = azure_client(&config)?;
    let overrides = parse_parameters(&parameters)?;
    let app = config.app.clone();

    output.progress(&format!(
        "Provisioning resources in {}",
        config.resource_group
    ));

    let name = submit_deployment(
        &client,
        config.resource_group.as_str(),
        EmbeddedTemplate::WebApp,
        |template| {
            set_parameter(
                template,
                "appName",
                "string",
                app.as_str(),
                "application name is required",
            )?;
            for (key, value) in &overrides {
                set_parameter(template, key, "string", value, "")?;
            }
            Ok(())
        },
    )
    .await?;

    output.progress(&format!(
        "Submitted deployment {} (polling every {}s)",
        name,
        config.poll_interval.as_secs()
    ));

    let mut monitor = DeploymentMonitor::new(config.poll_interval);
    monitor
        .run(&client, &config.resource_group, &name, &output)
        .await?;

    output.success("Provisioning complete!");
    Ok(())
}

/// Parse name=value template parameter overrides.
fn parse_parameters(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    Error::InvalidConfig(format!("parameter must be name=value, got: {pair}"))
                })
        })
        .collect()
}
