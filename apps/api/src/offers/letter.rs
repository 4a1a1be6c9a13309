use chrono::NaiveDate;

/// Everything the letter template needs, resolved from the applicant and job rows.
pub struct OfferLetterParams<'a> {
    pub applicant_name: &'a str,
    pub job_title: &'a str,
    pub location: Option<&'a str>,
    pub salary: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub issued_on: NaiveDate,
}

/// Renders an offer letter as a Markdown document.
pub fn render_offer_letter(params: &OfferLetterParams<'_>) -> String {
    let mut md = format!("# Offer of Employment: {}\n\n", params.job_title);
    md.push_str(&format!(
        "**Date:** {}\n\n",
        params.issued_on.format("%B %-d, %Y")
    ));
    md.push_str(&format!("Dear {},\n\n", params.applicant_name));
    md.push_str(&format!(
        "We are pleased to offer you the position of **{}**",
        params.job_title
    ));
    match params.location {
        Some(location) if !location.trim().is_empty() => {
            md.push_str(&format!(" based in {}.\n\n", location.trim()))
        }
        _ => md.push_str(".\n\n"),
    }

    md.push_str("## Terms\n\n");
    md.push_str(&format!(
        "- **Annual salary:** {}\n",
        params
            .salary
            .map(format_amount)
            .unwrap_or_else(|| "to be confirmed".to_string())
    ));
    md.push_str(&format!(
        "- **Start date:** {}\n\n",
        params
            .start_date
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "to be agreed".to_string())
    ));

    md.push_str(
        "Please confirm your acceptance by replying to this offer. \
         We look forward to welcoming you to the team.\n\n",
    );
    md.push_str("Sincerely,\n\nThe Hiring Team\n");
    md
}

/// `1234567.5` → `1,234,567.50`
fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{:02}", cents % 100)
}
