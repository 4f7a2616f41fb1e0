use clap::Parser;
use std::path::PathBuf;

/// Generates a JSON spec of the shading language functions and variables from docs.gl pages.
///
/// Pages are read from `docs.gl/sl4` next to the executable.
#[derive(Parser, Debug)]
#[command(version, author)]
pub struct InputOpts {
    /// Where to write the JSON spec.
    pub output: PathBuf,

    /// Read `.xhtml` pages from this directory instead of `docs.gl/sl4` next to the executable.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_positional() {
        let opts = InputOpts::try_parse_from(["gl-spec-gen", "spec.json"]).unwrap();
        assert_eq!(opts.output, PathBuf::from("spec.json"));
        assert_eq!(opts.input, None);

        let opts =
            InputOpts::try_parse_from(["gl-spec-gen", "--input", "pages", "spec.json"]).unwrap();
        assert_eq!(opts.input, Some(PathBuf::from("pages")));
    }

    #[test]
    fn help_names_the_default_pages() {
        use clap::CommandFactory;

        let help = InputOpts::command().render_long_help().to_string();
        assert!(help.contains("Pages are read from `docs.gl/sl4` next to the executable"));
        assert!(help.contains("instead of `docs.gl/sl4`"));
    }

    #[test]
    fn output_is_required() {
        assert!(InputOpts::try_parse_from(["gl-spec-gen"]).is_err());
    }
}
