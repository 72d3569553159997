//! Command-line parsing tests.

use clap::Parser;
use std::path::PathBuf;

use doc_rag::cli::Cli;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    temp_env::with_var_unset("DOC_RAG_CONFIG", || {
        Cli::try_parse_from(std::iter::once("doc-rag").chain(args.iter().copied()))
    })
}

#[test]
fn test_defaults() {
    let cli = parse(&[]).unwrap();

    assert!(cli.question.is_none());
    assert!(cli.config.is_none());
    assert!(cli.k.is_none());
    assert!(cli.urls.is_empty());
    assert!(cli.sitemaps.is_empty());
    assert!(!cli.json);
    assert!(cli.show_progress());
    assert!(!cli.overrides_sources());
}

#[test]
fn test_question_and_flags() {
    let cli = parse(&[
        "How do I draw a disc?",
        "--config",
        "custom.yaml",
        "-k",
        "5",
        "--show-sources",
    ])
    .unwrap();

    assert_eq!(cli.question.as_deref(), Some("How do I draw a disc?"));
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    assert_eq!(cli.k, Some(5));
    assert!(cli.show_sources);
}

#[test]
fn test_repeated_sources() {
    let cli = parse(&[
        "--url",
        "https://a.example/docs",
        "--url",
        "https://b.example/docs",
        "--sitemap",
        "https://a.example/sitemap.xml",
    ])
    .unwrap();

    assert_eq!(cli.urls, vec!["https://a.example/docs", "https://b.example/docs"]);
    assert_eq!(cli.sitemaps, vec!["https://a.example/sitemap.xml"]);
    assert!(cli.overrides_sources());
}

#[test]
fn test_json_and_quiet_hide_progress() {
    assert!(!parse(&["--json"]).unwrap().show_progress());
    assert!(!parse(&["-q"]).unwrap().show_progress());
}

#[test]
fn test_config_from_env() {
    let cli = temp_env::with_var("DOC_RAG_CONFIG", Some("/etc/doc-rag.yaml"), || {
        Cli::try_parse_from(["doc-rag"])
    })
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/etc/doc-rag.yaml")));
}

#[test]
fn test_invalid_k() {
    assert!(parse(&["-k", "three"]).is_err());
    assert!(parse(&["-k", "-1"]).is_err());
}
