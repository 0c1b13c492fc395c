pub mod test_reporter;
pub mod test_scope;
