use super::*;

#[test]
fn test_parse_test_command() {
    let cli = Cli::try_parse_from(["depth-eval", "test", "setup.xml", "kitchen"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Test {
            xml_file: PathBuf::from("setup.xml"),
            dataset: "kitchen".to_string(),
        }
    );
    assert_eq!(cli.data_dir, PathBuf::from("dataset/data"));
    assert_eq!(cli.gt_dir, PathBuf::from("data"));
    assert_eq!(cli.out, PathBuf::from("."));
    assert!(cli.profile.is_none());
}

#[test]
fn test_parse_vis_command_with_options() {
    let cli = Cli::try_parse_from([
        "depth-eval",
        "vis",
        "setup.xml",
        "kitchen",
        "12",
        "--out",
        "figures",
        "--data-dir",
        "bins",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Command::Vis {
            xml_file: PathBuf::from("setup.xml"),
            dataset: "kitchen".to_string(),
            frame_num: 12,
        }
    );
    assert_eq!(cli.out, PathBuf::from("figures"));
    assert_eq!(cli.data_dir, PathBuf::from("bins"));
}

#[test]
fn test_vis_requires_frame() {
    assert!(Cli::try_parse_from(["depth-eval", "vis", "setup.xml", "kitchen"]).is_err());
}

#[test]
fn test_test_requires_dataset() {
    assert!(Cli::try_parse_from(["depth-eval", "test", "setup.xml"]).is_err());
}

#[test]
fn test_unknown_command_is_external() {
    let cli = Cli::try_parse_from(["depth-eval", "bench", "x"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Other(vec!["bench".to_string(), "x".to_string()])
    );
}

#[test]
fn test_context_carries_paths() {
    let cli = Cli::try_parse_from(["depth-eval", "--gt-dir", "gt", "test", "s.xml", "lab"]).unwrap();
    let ctx = cli.context(Path::new("s.xml"), "lab", EvalProfile::default_v1());
    assert_eq!(ctx.xml_path, PathBuf::from("s.xml"));
    assert_eq!(ctx.dataset, "lab");
    assert_eq!(ctx.gt_dir, PathBuf::from("gt"));
}
