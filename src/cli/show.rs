//! Show command: print layer diagrams.

use crate::cli::common::{CliError, CliResult};
use crate::export::render_layer_diagram;
use crate::keymap::Keymap;
use crate::models::Layer;
use clap::Args;

/// Print keyboard diagrams of the keymap layers
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Layer to show, by name or index (all layers when omitted)
    #[arg(short, long, value_name = "LAYER")]
    pub layer: Option<String>,

    /// Show what transparent keys fall through to
    #[arg(long)]
    pub resolved: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self) -> CliResult<()> {
        let layers = match &self.layer {
            Some(name) => vec![name
                .parse::<Layer>()
                .map_err(|e| CliError::validation(format!("{e}")))?],
            None => Layer::ALL.to_vec(),
        };

        let keymap = Keymap::dvorak();
        let diagrams: Vec<String> = layers
            .into_iter()
            .map(|layer| render_layer_diagram(&keymap, layer, self.resolved))
            .collect();

        print!("{}", diagrams.join("\n"));
        Ok(())
    }
}
