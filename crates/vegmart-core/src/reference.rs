//! Built-in reference locations and the optional YAML override.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Known `"City, State"` locations offered by autocomplete when no live
/// record matches. Order is display order.
pub const REFERENCE_LOCATIONS: &[&str] = &[
    "Mumbai, Maharashtra",
    "Pune, Maharashtra",
    "Nagpur, Maharashtra",
    "Nashik, Maharashtra",
    "Ratnagiri, Maharashtra",
    "Kolhapur, Maharashtra",
    "Sangli, Maharashtra",
    "Solapur, Maharashtra",
    "Aurangabad, Maharashtra",
    "Thane, Maharashtra",
    "Navi Mumbai, Maharashtra",
    "Alphonso Belt, Maharashtra",
    "Ahmedabad, Gujarat",
    "Surat, Gujarat",
    "Vadodara, Gujarat",
    "Rajkot, Gujarat",
    "Bhavnagar, Gujarat",
    "Jamnagar, Gujarat",
    "Junagadh, Gujarat",
    "Kesar Belt, Gujarat",
    "Bangalore, Karnataka",
    "Mysore, Karnataka",
    "Hubli, Karnataka",
    "Dharwad, Karnataka",
    "Belgaum, Karnataka",
    "Gulbarga, Karnataka",
    "Bijapur, Karnataka",
    "Shimoga, Karnataka",
    "Tumkur, Karnataka",
    "Davangere, Karnataka",
    "Chennai, Tamil Nadu",
    "Coimbatore, Tamil Nadu",
    "Madurai, Tamil Nadu",
    "Tiruchirappalli, Tamil Nadu",
    "Salem, Tamil Nadu",
    "Erode, Tamil Nadu",
    "Tirunelveli, Tamil Nadu",
    "Vellore, Tamil Nadu",
    "Thoothukudi, Tamil Nadu",
    "Dindigul, Tamil Nadu",
    "Hyderabad, Telangana",
    "Vijayawada, Andhra Pradesh",
    "Visakhapatnam, Andhra Pradesh",
    "Guntur, Andhra Pradesh",
    "Nellore, Andhra Pradesh",
    "Kurnool, Andhra Pradesh",
    "Rajahmundry, Andhra Pradesh",
    "Tirupati, Andhra Pradesh",
    "Warangal, Telangana",
    "Nizamabad, Telangana",
    "Kochi, Kerala",
    "Thiruvananthapuram, Kerala",
    "Kozhikode, Kerala",
    "Thrissur, Kerala",
    "Kollam, Kerala",
    "Palakkad, Kerala",
    "Malappuram, Kerala",
    "Kannur, Kerala",
    "Kottayam, Kerala",
    "Alappuzha, Kerala",
    "Kolkata, West Bengal",
    "Howrah, West Bengal",
    "Durgapur, West Bengal",
    "Asansol, West Bengal",
    "Siliguri, West Bengal",
    "Bardhaman, West Bengal",
    "Malda, West Bengal",
    "Kharagpur, West Bengal",
    "Lucknow, Uttar Pradesh",
    "Kanpur, Uttar Pradesh",
    "Agra, Uttar Pradesh",
    "Varanasi, Uttar Pradesh",
    "Meerut, Uttar Pradesh",
    "Allahabad, Uttar Pradesh",
    "Bareilly, Uttar Pradesh",
    "Moradabad, Uttar Pradesh",
    "Saharanpur, Uttar Pradesh",
    "Gorakhpur, Uttar Pradesh",
    "Vegetable Market, Uttar Pradesh",
    "Delhi, Delhi",
    "New Delhi, Delhi",
    "Gurgaon, Haryana",
    "Noida, Uttar Pradesh",
    "Faridabad, Haryana",
    "Ghaziabad, Uttar Pradesh",
    "Greater Noida, Uttar Pradesh",
    "Jaipur, Rajasthan",
    "Jodhpur, Rajasthan",
    "Udaipur, Rajasthan",
    "Kota, Rajasthan",
    "Bikaner, Rajasthan",
    "Ajmer, Rajasthan",
    "Bharatpur, Rajasthan",
    "Alwar, Rajasthan",
    "Bhopal, Madhya Pradesh",
    "Indore, Madhya Pradesh",
    "Jabalpur, Madhya Pradesh",
    "Gwalior, Madhya Pradesh",
    "Ujjain, Madhya Pradesh",
    "Sagar, Madhya Pradesh",
    "Dewas, Madhya Pradesh",
    "Satna, Madhya Pradesh",
    "Chandigarh, Chandigarh",
    "Bhubaneswar, Odisha",
    "Guwahati, Assam",
    "Dehradun, Uttarakhand",
    "Shimla, Himachal Pradesh",
    "Jammu, Jammu and Kashmir",
    "Srinagar, Jammu and Kashmir",
    "Panaji, Goa",
    "Imphal, Manipur",
    "Aizawl, Mizoram",
    "Shillong, Meghalaya",
    "Agartala, Tripura",
    "Kohima, Nagaland",
    "Itanagar, Arunachal Pradesh",
    "Gangtok, Sikkim",
];

/// Quick-pick locations shown by the customer location selector.
pub const POPULAR_LOCATIONS: &[&str] = &[
    "Mumbai, Maharashtra",
    "Delhi, Delhi",
    "Bangalore, Karnataka",
    "Hyderabad, Telangana",
    "Chennai, Tamil Nadu",
    "Pune, Maharashtra",
    "Kolkata, West Bengal",
    "Ratnagiri, Maharashtra",
    "Alphonso Belt, Maharashtra",
    "Kesar Belt, Gujarat",
    "Vegetable Market, Uttar Pradesh",
];

#[derive(Debug, Deserialize)]
pub struct ReferenceLocationsFile {
    pub locations: Vec<String>,
}

/// The built-in list as owned strings.
#[must_use]
pub fn builtin_reference_locations() -> Vec<String> {
    REFERENCE_LOCATIONS.iter().map(|s| (*s).to_string()).collect()
}

/// Load and validate a reference list from a YAML file of the form
/// `locations: ["Mumbai, Maharashtra", ...]`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_reference_locations(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReferenceFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_reference_locations(&content)
}

/// Parse and validate reference locations from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` on malformed YAML, blank entries, or entries that
/// repeat another entry case-insensitively.
pub fn parse_reference_locations(content: &str) -> Result<Vec<String>, ConfigError> {
    let file: ReferenceLocationsFile =
        serde_yaml::from_str(content).map_err(ConfigError::ReferenceFileParse)?;

    validate_reference_locations(&file.locations)?;

    Ok(file.locations)
}

fn validate_reference_locations(locations: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for location in locations {
        if location.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reference location must be non-empty".to_string(),
            ));
        }

        if !seen.insert(location.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate reference location: '{location}'"
            )));
        }
    }

    Ok(())
}
