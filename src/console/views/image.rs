/// A static image resource. Mounting allocates no subscriptions, so the
/// view has no teardown.
pub struct ImageView {
    url: String,
}

impl ImageView {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
