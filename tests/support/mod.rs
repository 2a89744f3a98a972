pub mod ruler_env;
