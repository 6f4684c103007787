use crate::legacy::models::Wlan;
use crate::legacy::rest::RestObject;

impl RestObject for Wlan {
    const COLLECTION: &'static str = "rest/wlanconf";

    fn id(&self) -> &str {
        &self.id
    }
}
