use super::parse_path_arg;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Path as a JSON array, e.g. '["user", 0]'
    pub path: String,
}

pub fn path(args: PathArgs, _cwd: &str) -> Result<()> {
    println!("{}", parse_path_arg(&args.path)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_path_string() {
        let path = parse_path_arg(r#"["user", 0, "name"]"#).unwrap();
        assert_eq!(path.to_string(), r#"$["user"][0]["name"]"#);
        assert_eq!(parse_path_arg("[]").unwrap().to_string(), "$");
    }

    #[test]
    fn test_rejects_negative_index() {
        assert!(parse_path_arg("[-1]").is_err());
    }
}
