pub trait CustomResourceResponder {
    fn send_response(&self, response_url: &str, body: &str) -> Result<(), String>;
}
