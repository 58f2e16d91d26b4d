pub mod init;
pub mod print;
pub mod run;

pub use init::execute_init;
pub use print::execute_print;
pub use run::execute_run;
