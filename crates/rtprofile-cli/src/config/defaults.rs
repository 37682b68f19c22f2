use rtprofile::core::io::profile::EmptyBinPolicy;
use rtprofile::core::models::atom::DEFAULT_TARGET_SPECIES;
use rtprofile::setup::templates::Scheduler;

/// Values used when neither the command line nor a configuration file provides one.
pub struct DefaultsConfig {
    pub target_species: u32,
    pub empty_bins: EmptyBinPolicy,
    pub precision: Option<usize>,
    pub scheduler: Scheduler,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target_species: DEFAULT_TARGET_SPECIES,
            empty_bins: EmptyBinPolicy::Omit,
            precision: None,
            scheduler: Scheduler::Slurm,
        }
    }
}
