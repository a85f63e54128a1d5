pub mod powershell;

pub use powershell::PowerShellServiceControl;
