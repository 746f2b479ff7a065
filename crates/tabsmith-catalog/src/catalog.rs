use std::sync::OnceLock;

use serde::Serialize;

/// Pseudo-category that matches every descriptor.
pub const ALL_CATEGORIES: &str = "All";

const UNCATEGORIZED: &str = "Uncategorized";

/// Metadata for one field type offered to schema authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Stable identifier sent to the generation service (e.g. `email`).
    pub id: String,
    /// Human readable label.
    pub display_name: String,
    pub category: String,
    pub description: String,
    /// Literal sample shown in previews and copied into fields on type selection.
    pub example: String,
    /// Constraint text suggested when the type is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rule: Option<String>,
}

impl TypeDescriptor {
    fn category_label(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }

    fn haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.display_name, self.description, self.category
        )
        .to_lowercase()
    }
}

/// Ordered, read-only list of type descriptors.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }

    /// Process-wide built-in catalog, materialized on first use.
    pub fn builtin() -> &'static TypeCatalog {
        static CATALOG: OnceLock<TypeCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| TypeCatalog::new(builtin_types()))
    }

    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Exact match on identifier or display name.
    pub fn lookup(&self, id_or_name: &str) -> Option<&TypeDescriptor> {
        self.types
            .iter()
            .find(|t| t.id == id_or_name || t.display_name == id_or_name)
    }

    pub fn is_known(&self, id_or_name: &str) -> bool {
        self.lookup(id_or_name).is_some()
    }

    /// Categories with their descriptor counts, `All` first, then in order of
    /// first appearance.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> =
            vec![(ALL_CATEGORIES.to_string(), self.types.len())];
        for descriptor in &self.types {
            let label = descriptor.category_label();
            match counts.iter_mut().skip(1).find(|(name, _)| name == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }
        counts
    }

    /// Case-insensitive search over name, description and category.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&TypeDescriptor> {
        let needle = query.trim().to_lowercase();
        self.types
            .iter()
            .filter(|t| match category {
                None => true,
                Some(ALL_CATEGORIES) => true,
                Some(wanted) => t.category_label() == wanted,
            })
            .filter(|t| needle.is_empty() || t.haystack().contains(&needle))
            .collect()
    }
}

fn descriptor(
    id: &str,
    display_name: &str,
    category: &str,
    description: &str,
    example: &str,
    default_rule: Option<&str>,
) -> TypeDescriptor {
    TypeDescriptor {
        id: id.to_string(),
        display_name: display_name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        example: example.to_string(),
        default_rule: default_rule.map(str::to_string),
    }
}

fn builtin_types() -> Vec<TypeDescriptor> {
    general_types().into_iter().chain(banking_types()).collect()
}

fn general_types() -> Vec<TypeDescriptor> {
    vec![
        // Personal
        descriptor("first_name", "First Name", "Personal", "Common given names.", "Aarav", None),
        descriptor("last_name", "Last Name", "Personal", "Common family names.", "Sharma", None),
        descriptor(
            "full_name",
            "Full Name",
            "Personal",
            "Concatenated first and last name.",
            "Aarav Sharma",
            None,
        ),
        descriptor(
            "email",
            "Email Address",
            "Personal",
            "Random realistic email addresses.",
            "aarav.sharma@example.com",
            None,
        ),
        descriptor(
            "phone",
            "Phone Number",
            "Personal",
            "Local-format phone numbers with country code variants.",
            "+91-9876543210",
            None,
        ),
        descriptor("gender", "Gender", "Personal", "Gender value (Male/Female/Other).", "Male", None),
        descriptor(
            "dob",
            "Date of Birth",
            "Personal",
            "Birth date in YYYY-MM-DD format.",
            "1990-05-14",
            None,
        ),
        // Location
        descriptor(
            "address_line1",
            "Address Line 1",
            "Location",
            "Street address or PO box.",
            "221B Baker Street",
            None,
        ),
        descriptor(
            "address_line2",
            "Address Line 2",
            "Location",
            "Apartment, suite, unit, building, floor, etc.",
            "Apt 5",
            None,
        ),
        descriptor("city", "City", "Location", "City names.", "Mumbai", None),
        descriptor(
            "state",
            "State / Province",
            "Location",
            "State, province or region name.",
            "Karnataka",
            None,
        ),
        descriptor(
            "postal_code",
            "Postal Code / ZIP",
            "Location",
            "Postal code / zip code for region.",
            "560001",
            None,
        ),
        descriptor("country", "Country", "Location", "Country names or ISO codes.", "IN", None),
        descriptor("latitude", "Latitude", "Location", "Latitude coordinate.", "12.9716", None),
        descriptor("longitude", "Longitude", "Location", "Longitude coordinate.", "77.5946", None),
        // Finance
        descriptor("bank_name", "Bank Name", "Finance", "Popular bank names.", "HDFC Bank", None),
        descriptor(
            "account_number",
            "Bank Account Number",
            "Finance",
            "Numeric bank account number.",
            "012345678901",
            Some("digits, length 9-18"),
        ),
        descriptor(
            "ifsc",
            "IFSC Code (India)",
            "Finance",
            "11-character Indian IFSC code.",
            "SBIN0000456",
            Some("^[A-Z]{4}0[A-Z0-9]{6}$"),
        ),
        descriptor(
            "pan",
            "PAN Number (India)",
            "Finance",
            "10-character PAN format.",
            "ABCDE1234F",
            Some("[A-Z]{3}[A-Z][A-Z][0-9]{4}[A-Z]"),
        ),
        descriptor(
            "iban",
            "IBAN",
            "Finance",
            "International Bank Account Number.",
            "GB29NWBK60161331926819",
            None,
        ),
        descriptor(
            "swift_bic",
            "SWIFT/BIC",
            "Finance",
            "SWIFT/BIC code (8 or 11 chars).",
            "HDFCINBBXXX",
            None,
        ),
        descriptor(
            "routing_number",
            "Routing Number (ABA)",
            "Finance",
            "US routing number (9 digits).",
            "011000138",
            Some("^[0-9]{9}$"),
        ),
        descriptor(
            "credit_card_number",
            "Credit Card Number",
            "Finance",
            "Valid-looking credit card numbers (Luhn).",
            "4111 1111 1111 1111",
            None,
        ),
        descriptor("credit_card_expiry", "Card Expiry", "Finance", "MM/YY expiry date.", "09/28", None),
        descriptor("cvv", "CVV", "Finance", "3- or 4-digit card security code.", "123", None),
        descriptor(
            "transaction_id",
            "Transaction ID",
            "Finance",
            "Random transaction identifier.",
            "TXN-20251105-0001",
            None,
        ),
        descriptor(
            "transaction_amount",
            "Transaction Amount",
            "Finance",
            "Monetary amount with currency.",
            "1250.75",
            None,
        ),
        // Commerce
        descriptor(
            "product_name",
            "Product Name",
            "Commerce",
            "Common product names.",
            "Acme Running Shoes",
            None,
        ),
        descriptor("sku", "SKU", "Commerce", "Stock keeping unit identifiers.", "ACME-RT-001", None),
        descriptor("price", "Price", "Commerce", "Product price (decimal).", "49.99", None),
        descriptor("order_id", "Order ID", "Commerce", "Order identifiers.", "ORD-1000123", None),
        descriptor("order_status", "Order Status", "Commerce", "Order lifecycle status.", "shipped", None),
        // Company
        descriptor("company_name", "Company", "Company", "Company or organization names.", "Acme Corp", None),
        descriptor(
            "job_title",
            "Job Title",
            "Company",
            "Employee job titles.",
            "Senior Software Engineer",
            None,
        ),
        descriptor("department", "Department", "Company", "Department name.", "Engineering", None),
        descriptor("salary", "Salary", "Company", "Salary amount.", "120000", None),
        // Identifiers
        descriptor(
            "uuid",
            "UUID",
            "Identifiers",
            "Random UUID v4.",
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            None,
        ),
        descriptor(
            "ssn",
            "SSN (US)",
            "Identifiers",
            "US Social Security Number format.",
            "123-45-6789",
            None,
        ),
        descriptor(
            "passport",
            "Passport Number",
            "Identifiers",
            "Passport number format (varies by country).",
            "M0123456",
            None,
        ),
        descriptor("isbn", "ISBN", "Identifiers", "Book ISBN (10 or 13 digits).", "9780306406157", None),
        // IT
        descriptor("ip_v4", "IP Address v4", "IT", "IPv4 address.", "192.168.1.100", None),
        descriptor(
            "ip_v6",
            "IP Address v6",
            "IT",
            "IPv6 address.",
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            None,
        ),
        descriptor("mac_address", "MAC Address", "IT", "MAC addresses.", "00:1B:44:11:3A:B7", None),
        descriptor("url", "URL", "IT", "Random URLs.", "https://example.com/product/1", None),
        // Text
        descriptor("lorem_word", "Lorem Word", "Text", "Random lorem ipsum words.", "lorem", None),
        descriptor(
            "lorem_sentence",
            "Lorem Sentence",
            "Text",
            "Random lorem ipsum sentence.",
            "Lorem ipsum dolor sit amet.",
            None,
        ),
        descriptor(
            "paragraph",
            "Paragraph",
            "Text",
            "Multi-sentence paragraph.",
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
            None,
        ),
        // Health
        descriptor(
            "medical_record",
            "Medical Record Number",
            "Health",
            "Hospital medical record numbers.",
            "MRN-2025-00123",
            None,
        ),
        descriptor("icd_code", "Diagnosis Code (ICD)", "Health", "ICD-10 style codes.", "I10", None),
        // Travel and logistics
        descriptor("flight_number", "Flight Number", "Travel", "Airline flight numbers.", "AI-101", None),
        descriptor("airline_code", "Airline Code", "Travel", "IATA airline code.", "AI", None),
        descriptor(
            "tracking_number",
            "Tracking Number",
            "Logistics",
            "Parcel tracking codes.",
            "1Z9999W99999999999",
            None,
        ),
        // Misc
        descriptor("hex_color", "Hex Color", "Misc", "Hexadecimal color code.", "#ff5733", None),
        descriptor("boolean", "Boolean", "Misc", "True/False value.", "true", None),
        descriptor("integer", "Integer", "Misc", "Integer number.", "42", None),
        descriptor("float", "Float", "Misc", "Floating point number.", "3.1415", None),
    ]
}

fn banking_types() -> Vec<TypeDescriptor> {
    vec![
        descriptor(
            "ifsc_branch_address",
            "Branch Address",
            "Banking",
            "Physical address of the bank branch.",
            "MG Road, Bengaluru, Karnataka",
            None,
        ),
        descriptor(
            "micr",
            "MICR Code",
            "Banking",
            "Magnetic ink character recognition code used in India for cheques (9 digits).",
            "110002001",
            Some("^[0-9]{9}$"),
        ),
        descriptor(
            "account_type",
            "Account Type",
            "Banking",
            "Type of account: Savings, Current, Salary, NRE, NRO.",
            "Savings",
            Some("one of [Savings, Current, Salary, NRE, NRO]"),
        ),
        descriptor(
            "pan_masked",
            "PAN (masked)",
            "Banking",
            "Masked PAN for privacy, e.g., AB***234F.",
            "AB***234F",
            None,
        ),
        descriptor(
            "ifsc_lookup",
            "IFSC (with branch)",
            "Banking",
            "IFSC with a friendly branch name included.",
            "SBIN0000456 - MG ROAD BRANCH",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_id_or_display_name() {
        let catalog = TypeCatalog::builtin();
        assert_eq!(catalog.lookup("ifsc").map(|t| t.example.as_str()), Some("SBIN0000456"));
        assert_eq!(
            catalog.lookup("Email Address").map(|t| t.id.as_str()),
            Some("email")
        );
        assert!(catalog.lookup("email address").is_none());
        assert!(catalog.lookup("string").is_none());
    }

    #[test]
    fn banking_extras_are_disjoint_from_general_entries() {
        let general: std::collections::BTreeSet<String> =
            general_types().into_iter().map(|t| t.id).collect();
        assert!(banking_types().iter().all(|t| !general.contains(&t.id)));

        let catalog = TypeCatalog::builtin();
        let bank = catalog.lookup("bank_name").expect("bank_name");
        assert_eq!(bank.category, "Finance");
        assert!(catalog.lookup("micr").is_some());
        let ids: Vec<&str> = catalog.types().iter().map(|t| t.id.as_str()).collect();
        let unique: std::collections::BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let catalog = TypeCatalog::new(vec![
            descriptor("a", "A", "Text", "", "", None),
            descriptor("b", "B", "", "", "", None),
            descriptor("c", "C", "Text", "", "", None),
        ]);
        assert_eq!(
            catalog.categories(),
            vec![
                ("All".to_string(), 3),
                ("Text".to_string(), 2),
                ("Uncategorized".to_string(), 1),
            ]
        );
    }

    #[test]
    fn search_filters_by_query_and_category() {
        let catalog = TypeCatalog::builtin();
        let hits = catalog.search("ifsc", None);
        assert!(hits.iter().any(|t| t.id == "ifsc"));
        assert!(hits.iter().any(|t| t.id == "ifsc_lookup"));

        let finance_only = catalog.search("IFSC", Some("Finance"));
        assert_eq!(finance_only.len(), 1);
        assert_eq!(finance_only[0].id, "ifsc");

        assert_eq!(catalog.search("  ", Some(ALL_CATEGORIES)).len(), catalog.len());
    }
}
