pub trait CallerIdentity {
    fn caller_account(&self) -> Result<String, String>;
}
