//! The banner printed before the chat starts.

const WIDTH: usize = 64;

const FEATURES: [(&str, &str); 3] = [
    (
        "Instant Approval",
        "Get loan approval in minutes with our AI-powered assessment",
    ),
    (
        "Secure & Safe",
        "Your data is protected with bank-grade security protocols",
    ),
    (
        "Flexible Terms",
        "Customize your loan tenure and amount as per your needs",
    ),
];

const WHY_CHOOSE: [&str; 6] = [
    "Competitive interest rates starting from 10.5%",
    "Loan amounts up to ₹25 lakhs",
    "Flexible tenure from 12 to 60 months",
    "No hidden charges or processing fees",
    "24/7 customer support",
    "Quick disbursal within 48 hours",
];

/// Tagline, feature highlights and the "Why Choose" list for `lender`.
pub fn landing_page(lender: &str) -> String {
    let rule = "─".repeat(WIDTH);
    let mut out = format!(
        "{rule}\n{:^width$}\n{:^width$}\n{:^width$}\n{rule}\n\n",
        "Trusted by millions",
        "Get Your Personal Loan in Minutes",
        "Experience the future of lending with our AI-powered loan assistant.",
        width = WIDTH
    );

    for (title, blurb) in FEATURES {
        out.push_str(&format!("  * {title}\n    {blurb}\n"));
    }

    out.push_str(&format!("\nWhy Choose {lender}?\n"));
    for reason in WHY_CHOOSE {
        out.push_str(&format!("  ✓ {reason}\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}
