//! Init command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{AdvTrainSpec, InitArgs};

/// YAML for a run with reference defaults on `args.dataset`
pub fn generate_yaml(args: &InitArgs) -> Result<String, String> {
    let mut spec = AdvTrainSpec::default();
    spec.data.dataset = args.dataset;
    if let Some(root) = &args.data_root {
        spec.data.root = root.clone();
    }
    let body =
        serde_yaml::to_string(&spec).map_err(|e| format!("YAML serialization error: {e}"))?;
    Ok(format!(
        "# Free adversarial training on {}\n# endurecer train <this file>\n{body}",
        args.dataset
    ))
}

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let yaml = generate_yaml(&args)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &yaml).map_err(|e| format!("Failed to write file: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Config saved to: {}", output_path.display()),
        );
    } else {
        println!("{yaml}");
    }

    Ok(())
}
