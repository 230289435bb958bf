//! CLI Command Tests
//!
//! Argument parsing, defaults, conflicts and the JSON envelope.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use cinescope::cli::{Cli, Command, SizeArg};
    use cinescope::models::ImageSize;

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_popular_defaults() {
        let cli = Cli::parse_from(["cinescope", "popular"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Popular(cmd)) => {
                assert_eq!(cmd.page, None);
                assert_eq!(cmd.pages, 1);
                assert_eq!(cmd.limit, None);
            }
            _ => panic!("Expected Popular command"),
        }
    }

    #[test]
    fn test_popular_pages_and_limit() {
        let cli = Cli::parse_from(["cinescope", "popular", "--pages", "3", "-l", "10"]);
        match cli.command {
            Some(Command::Popular(cmd)) => {
                assert_eq!(cmd.pages, 3);
                assert_eq!(cmd.limit, Some(10));
            }
            _ => panic!("Expected Popular command"),
        }
    }

    #[test]
    fn test_popular_page_conflicts_with_pages() {
        let result = Cli::try_parse_from(["cinescope", "popular", "--page", "2", "--pages", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["cinescope", "search", "blade runner", "--page", "2"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "blade runner");
                assert_eq!(cmd.page, 2);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["cinescope", "search"]).is_err());
    }

    #[test]
    fn test_search_alias() {
        let cli = Cli::parse_from(["cinescope", "s", "dune"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["cinescope", "info", "438631", "--partial"]);
        match cli.command {
            Some(Command::Info(cmd)) => {
                assert_eq!(cmd.id, 438631);
                assert!(cmd.partial);
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_info_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["cinescope", "info", "tt1160419"]).is_err());
    }

    #[test]
    fn test_image_command() {
        let cli = Cli::parse_from(["cinescope", "image", "/abc.jpg", "--size", "original"]);
        match cli.command {
            Some(Command::Image(cmd)) => {
                assert_eq!(cmd.path, "/abc.jpg");
                assert_eq!(cmd.size, SizeArg::Original);
                assert_eq!(ImageSize::from(cmd.size), ImageSize::Original);
            }
            _ => panic!("Expected Image command"),
        }
    }

    #[test]
    fn test_image_default_size() {
        let cli = Cli::parse_from(["cinescope", "image", "/abc.jpg"]);
        match cli.command {
            Some(Command::Image(cmd)) => assert_eq!(cmd.size, SizeArg::Medium),
            _ => panic!("Expected Image command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "cinescope",
            "popular",
            "--json",
            "--quiet",
            "--config",
            "/tmp/cinescope.toml",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/cinescope.toml"))
        );
    }
}

// =============================================================================
// Output Format Tests
// =============================================================================

mod output_format {
    use cinescope::cli::{ExitCode, JsonOutput};
    use cinescope::commands::TitlePage;
    use cinescope::models::Title;

    fn title() -> Title {
        Title {
            id: 438631,
            title: "Dune".into(),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: "2021-09-15".into(),
            vote_average: 7.8,
            vote_count: 9000,
            genre_ids: vec![878],
        }
    }

    #[test]
    fn test_title_page_envelope() {
        let items = vec![title()];
        let page = TitlePage {
            page: 1,
            has_more: true,
            results: &items,
        };
        let json = serde_json::to_value(JsonOutput::success(&page)).unwrap();

        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["has_more"], true);
        assert_eq!(json["data"]["results"][0]["id"], 438631);
        assert_eq!(json["data"]["results"][0]["title"], "Dune");
        assert!(json.get("error").is_none());
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let output = JsonOutput::<()>::error_msg("Missing required environment variable: API_URL", ExitCode::ConfigError);
        let json = serde_json::to_value(&output).unwrap();

        assert!(json.get("data").is_none());
        assert_eq!(json["exit_code"], 4);
        assert!(json["error"].as_str().unwrap().contains("API_URL"));
    }
}
