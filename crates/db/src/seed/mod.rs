mod defaults;

pub use defaults::seed_defaults;
