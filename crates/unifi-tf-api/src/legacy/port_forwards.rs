use crate::legacy::models::PortForward;
use crate::legacy::rest::RestObject;

impl RestObject for PortForward {
    const COLLECTION: &'static str = "rest/portforward";

    fn id(&self) -> &str {
        &self.id
    }
}
