/// Command-line parsing for every subcommand.
use std::path::PathBuf;

use agentflow::cli::commands::DEFAULT_PROMPT;
use agentflow::cli::{Cli, Commands};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("agentflow").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_direct_defaults_to_capital_question() {
    let cli = parse(&["direct"]);
    assert!(!cli.json);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Direct(args) => assert_eq!(args.prompt, DEFAULT_PROMPT),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["direct", "Hello", "--json", "--config", "custom.yaml"]);
    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Direct(args) => assert_eq!(args.prompt, "Hello"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_augmented_persona() {
    match parse(&["augmented", "-p", "You are a pirate", "Where is Paris?"]).command {
        Commands::Augmented(args) => {
            assert_eq!(args.persona, "You are a pirate");
            assert_eq!(args.prompt, "Where is Paris?");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_knowledge_defaults_and_override() {
    match parse(&["knowledge"]).command {
        Commands::Knowledge(args) => {
            assert_eq!(args.knowledge, "The capital of France is London, not Paris");
        }
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["knowledge", "-k", "Paris is in France"]).command {
        Commands::Knowledge(args) => assert_eq!(args.knowledge, "Paris is in France"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_plan_knowledge_file() {
    match parse(&["plan", "--knowledge-file", "recipes.md", "Boil an egg"]).command {
        Commands::Plan(args) => {
            assert_eq!(args.prompt, "Boil an egg");
            assert_eq!(args.knowledge_file, Some(PathBuf::from("recipes.md")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_evaluate_max_iterations() {
    match parse(&["evaluate", "-m", "3"]).command {
        Commands::Evaluate(args) => assert_eq!(args.max_iterations, Some(3)),
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["evaluate"]).command {
        Commands::Evaluate(args) => assert_eq!(args.max_iterations, None),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_evaluate_rejects_zero_iterations() {
    assert!(Cli::try_parse_from(["agentflow", "evaluate", "--max-iterations", "0"]).is_err());
}

#[test]
fn test_route_collects_prompts() {
    match parse(&["route", "first", "second"]).command {
        Commands::Route(args) => assert_eq!(args.prompts, vec!["first", "second"]),
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["route"]).command {
        Commands::Route(args) => assert!(args.prompts.is_empty()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_workflow_spec_and_prompt() {
    match parse(&["workflow", "-s", "spec.txt", "-p", "Plan it"]).command {
        Commands::Workflow(args) => {
            assert_eq!(args.spec, Some(PathBuf::from("spec.txt")));
            assert_eq!(args.prompt, "Plan it");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["agentflow", "teleport"]).is_err());
    assert!(Cli::try_parse_from(["agentflow"]).is_err());
}
