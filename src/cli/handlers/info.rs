//! Information display handlers (config)

use crate::cli::output::*;
use crate::knowledge::KnowledgeStore;
use crate::AppConfig;
use crate::Result;

/// Print the effective configuration and what the knowledge sources hold
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config);
    println!();

    match KnowledgeStore::load(&config.knowledge) {
        Ok(store) => {
            for (source, count) in store.source_counts() {
                print_info(&format!("{source}: {count} records"));
            }
            print_success(&format!("{} knowledge records loaded", store.len()));
        }
        Err(e) => print_warning(&format!("Knowledge sources not loadable: {e}")),
    }

    Ok(())
}
