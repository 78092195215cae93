pub trait WorkQueue {
    fn send_message(&self, queue_url: &str, body: &str) -> Result<(), String>;
}
