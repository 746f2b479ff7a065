use chrono::Datelike;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::catalog::TypeCatalog;

/// Literal returned when neither the catalog nor a built-in generator knows the type.
pub const FALLBACK_PREVIEW: &str = "example_value";

/// Representative value for `type_id` from the built-in catalog.
///
/// Draws from the thread RNG, so two calls may disagree. Display only.
pub fn preview(type_id: &str) -> String {
    preview_with_rng(TypeCatalog::builtin(), type_id, &mut rand::rng())
}

/// Resolution order: catalog example, built-in generator, fallback literal.
pub fn preview_with_rng<R: Rng + ?Sized>(
    catalog: &TypeCatalog,
    type_id: &str,
    rng: &mut R,
) -> String {
    if type_id.is_empty() {
        return String::new();
    }

    if let Some(descriptor) = catalog.lookup(type_id)
        && !descriptor.example.is_empty()
    {
        return descriptor.example.clone();
    }

    generate(type_id, rng).unwrap_or_else(|| FALLBACK_PREVIEW.to_string())
}

fn generate<R: Rng + ?Sized>(type_id: &str, rng: &mut R) -> Option<String> {
    let value = match type_id {
        "first_name" => pick(rng, &["Aarav", "Neha", "Rohan", "Priya"]),
        "last_name" => pick(rng, &["Sharma", "Patel", "Kumar", "Singh"]),
        "full_name" => format!(
            "{} {}",
            pick(rng, &["Aarav", "Neha", "Rohan", "Priya"]),
            pick(rng, &["Sharma", "Patel", "Kumar", "Singh"])
        ),
        "email" => format!("user{}@example.com", rng.random_range(100..=999)),
        "phone" => format!("+91-{}", rng.random_range(7_000_000_000_u64..=9_999_999_999)),
        "gender" => pick(rng, &["Male", "Female", "Other"]),
        "dob" => format!(
            "19{}-{:02}-{:02}",
            rng.random_range(70..=99),
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        ),
        "address_line1" => format!("{} MG Road", rng.random_range(1..=999)),
        "city" => pick(rng, &["Mumbai", "Bengaluru", "Delhi", "Kolkata"]),
        "state" => pick(rng, &["Karnataka", "Maharashtra", "Delhi", "West Bengal"]),
        "postal_code" => (560_000 + rng.random_range(0..=999)).to_string(),
        "country" => "IN".to_string(),
        "latitude" => format!("{:.6}", 12.9716 + rng.random::<f64>() * 0.1),
        "longitude" => format!("{:.6}", 77.5946 + rng.random::<f64>() * 0.1),
        "bank_name" => pick(rng, &["HDFC Bank", "State Bank of India", "ICICI Bank"]),
        "account_number" => format!(
            "{}{}",
            rng.random_range(100_000_000..=999_999_999),
            rng.random_range(1000..=9999)
        ),
        "ifsc" => format!("SBIN000{}", rng.random_range(100..=999)),
        "pan" => format!("ABCDE{}F", rng.random_range(1000..=9999)),
        "iban" => "GB29NWBK60161331926819".to_string(),
        "swift_bic" => "HDFCINBBXXX".to_string(),
        "routing_number" => rng.random_range(100_000_000..=999_999_999).to_string(),
        "credit_card_number" => "4111 1111 1111 1111".to_string(),
        "credit_card_expiry" => format!(
            "{:02}/{}",
            rng.random_range(1..=12),
            rng.random_range(24..=30)
        ),
        "cvv" => rng.random_range(100..=999).to_string(),
        "transaction_id" => format!(
            "TXN-{}-{}",
            chrono::Utc::now().year(),
            rng.random_range(1000..=9999)
        ),
        "price" => format!("{:.2}", rng.random::<f64>() * 1000.0),
        "uuid" => "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string(),
        "ip_v4" => format!(
            "192.168.{}.{}",
            rng.random_range(0..=255),
            rng.random_range(1..=254)
        ),
        "ip_v6" => "2001:0db8:85a3:0000:0000:8a2e:0370:7334".to_string(),
        "mac_address" => "00:1B:44:11:3A:B7".to_string(),
        "url" => format!("https://example.com/{}", rng.random_range(1..=999)),
        "hex_color" => pick(rng, &["#ff5733", "#33aaff", "#bada55"]),
        "boolean" => rng.random_bool(0.5).to_string(),
        "integer" => rng.random_range(0..=9999).to_string(),
        "float" => format!("{:.4}", rng.random::<f64>() * 100.0),
        "lorem_word" => pick(rng, &["lorem", "ipsum", "dolor", "amet"]),
        _ => return None,
    };
    Some(value)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}
