pub mod attendance;
pub mod payslip;
