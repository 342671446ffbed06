//! postcodes.io API response types for single postcode lookup.
//!
//! See: <https://postcodes.io/docs/postcode/lookup>

use serde::Deserialize;

/// Envelope returned by `GET /postcodes/{postcode}`.
///
/// Successful lookups carry `status: 200` and a `result`; failures carry the
/// HTTP status and an `error` message instead.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    /// HTTP status echoed in the body.
    pub status: u16,

    /// Postcode details when the lookup succeeded.
    #[serde(default)]
    pub result: Option<PostcodeResult>,

    /// Error message when the lookup failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl LookupResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// The subset of postcode details used for routing.
///
/// Terminated and non-geographic postcodes are returned with `null`
/// coordinates.
#[derive(Debug, Deserialize)]
pub struct PostcodeResult {
    /// Normalised postcode, e.g. `"BH1 2PE"`.
    pub postcode: String,

    /// WGS84 latitude in decimal degrees.
    pub latitude: Option<f64>,

    /// WGS84 longitude in decimal degrees.
    pub longitude: Option<f64>,
}

impl PostcodeResult {
    /// Latitude and longitude when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "status": 200,
            "result": {
                "postcode": "BH1 2PE",
                "quality": 1,
                "latitude": 50.7209,
                "longitude": -1.8806,
                "country": "England"
            }
        }"#;

        let response: LookupResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let result = response.result.expect("should have result");
        assert_eq!(result.postcode, "BH1 2PE");
        assert_eq!(result.coordinates(), Some((50.7209, -1.8806)));
    }

    #[test]
    fn deserialise_not_found_response() {
        let json = r#"{ "status": 404, "error": "Postcode not found" }"#;

        let response: LookupResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.result.is_none());
        assert_eq!(response.error.as_deref(), Some("Postcode not found"));
    }

    #[test]
    fn deserialise_result_with_null_coordinates() {
        let json = r#"{
            "status": 200,
            "result": { "postcode": "GY1 1AA", "latitude": null, "longitude": null }
        }"#;

        let response: LookupResponse = serde_json::from_str(json).expect("should deserialise");

        let result = response.result.expect("should have result");
        assert_eq!(result.coordinates(), None);
    }
}
