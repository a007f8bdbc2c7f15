use crate::models::IndustryCount;
use uuid::Uuid;

/// Builds a DOM-scoped unique key for a chart element.
///
/// The identifier is treated as optional: if it is absent, or sanitizing it
/// leaves nothing usable, a generated fallback key is substituted so the
/// caller always gets a safe, non-empty id.
pub fn chart_key(prefix: &str, identifier: Option<&str>) -> String {
    let sanitized = identifier.map(|raw| {
        raw.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    });

    match sanitized {
        Some(s) if !s.is_empty() => format!("{}-{}", prefix, s),
        _ => format!("{}-{}", prefix, Uuid::new_v4()),
    }
}

/// Escapes text for embedding in HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The lead-capture form page.
///
/// Client-side behavior: minimal validation (non-empty fields, email shape),
/// one pipeline call per submit, submit button disabled while a request is in
/// flight, and idle/submitting/success/error states.
pub const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Get in touch</title>
    <style>
        body { font-family: sans-serif; max-width: 28rem; margin: 4rem auto; padding: 0 1rem; }
        label { display: block; margin-top: 1rem; }
        input, select { width: 100%; padding: 0.5rem; margin-top: 0.25rem; }
        button { margin-top: 1.5rem; padding: 0.5rem 1.5rem; }
        button:disabled { opacity: 0.5; }
        .error { color: #b00020; }
        .success { color: #1b5e20; }
    </style>
</head>
<body>
    <h1>Get in touch</h1>
    <form id="capture-form">
        <label>Name <input type="text" id="name" autocomplete="name"></label>
        <label>Email <input type="email" id="email" autocomplete="email"></label>
        <label>Industry
            <select id="industry">
                <option value="">Select an industry</option>
                <option>finance</option>
                <option>healthcare</option>
                <option>retail</option>
                <option>technology</option>
                <option>other</option>
            </select>
        </label>
        <button type="submit" id="submit-btn">Submit</button>
    </form>
    <p id="status"></p>
    <script>
        const form = document.getElementById('capture-form');
        const button = document.getElementById('submit-btn');
        const status = document.getElementById('status');
        let inFlight = false;

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            if (inFlight) return; // one pipeline call per submission

            const name = document.getElementById('name').value.trim();
            const email = document.getElementById('email').value.trim();
            const industry = document.getElementById('industry').value;

            if (!name || !industry || !/^[^@\s]+@[^@\s]+\.[^@\s]+$/.test(email)) {
                status.className = 'error';
                status.textContent = 'Please fill in all fields with a valid email.';
                return;
            }

            inFlight = true;
            button.disabled = true;
            status.className = '';
            status.textContent = 'Submitting…';

            try {
                const res = await fetch('/api/v1/confirmations', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ name, email, industry })
                });
                const data = await res.json();
                if (res.ok && data.success) {
                    status.className = 'success';
                    status.textContent = 'Thanks! Check your inbox for a confirmation.';
                    form.reset();
                } else {
                    status.className = 'error';
                    status.textContent = 'Something went wrong. Please try again.';
                }
            } catch (err) {
                status.className = 'error';
                status.textContent = 'Something went wrong. Please try again.';
            } finally {
                inFlight = false;
                button.disabled = false;
            }
        });
    </script>
</body>
</html>
"#;

/// Renders the ancillary dashboard: one bar per industry.
pub fn dashboard_page(counts: &[IndustryCount]) -> String {
    let max = counts.iter().map(|c| c.total).max().unwrap_or(0).max(1);

    let mut bars = String::new();
    for count in counts {
        let key = chart_key("industry", Some(&count.industry));
        let width = (count.total * 100 / max).max(2);
        bars.push_str(&format!(
            "<div class=\"row\" id=\"{}\">\
             <span class=\"label\">{}</span>\
             <div class=\"bar\" style=\"width:{}%\"></div>\
             <span class=\"count\">{}</span>\
             </div>",
            key,
            escape_html(&count.industry),
            width,
            count.total
        ));
    }

    if bars.is_empty() {
        bars.push_str("<p>No leads captured yet.</p>");
    }

    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\"><head><meta charset=\"UTF-8\"><title>Leads by industry</title>\
         <style>\
         body {{ font-family: sans-serif; max-width: 36rem; margin: 4rem auto; padding: 0 1rem; }}\
         .row {{ display: flex; align-items: center; gap: 0.5rem; margin: 0.5rem 0; }}\
         .label {{ width: 8rem; }}\
         .bar {{ background: #1976d2; height: 1rem; }}\
         </style></head><body>\
         <h1>Leads by industry</h1>{}\
         </body></html>",
        bars
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_key_uses_the_identifier_when_present() {
        assert_eq!(chart_key("industry", Some("Finance")), "industry-finance");
        assert_eq!(
            chart_key("industry", Some("Real Estate")),
            "industry-real-estate"
        );
    }

    #[test]
    fn chart_key_falls_back_when_identifier_is_absent() {
        let key = chart_key("industry", None);
        assert!(key.starts_with("industry-"));
        assert!(key.len() > "industry-".len());
    }

    #[test]
    fn chart_key_falls_back_when_identifier_is_unusable() {
        let key = chart_key("industry", Some("!!!"));
        assert!(key.starts_with("industry-"));
        // Nothing survives sanitization, so a generated id is substituted
        assert_ne!(key, "industry-");
    }

    #[test]
    fn dashboard_renders_one_row_per_industry() {
        let counts = vec![
            IndustryCount {
                industry: "finance".to_string(),
                total: 3,
            },
            IndustryCount {
                industry: "retail".to_string(),
                total: 1,
            },
        ];
        let page = dashboard_page(&counts);
        assert!(page.contains("id=\"industry-finance\""));
        assert!(page.contains("id=\"industry-retail\""));
    }

    #[test]
    fn dashboard_escapes_industry_labels() {
        let counts = vec![IndustryCount {
            industry: "<script>".to_string(),
            total: 1,
        }];
        let page = dashboard_page(&counts);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<span class=\"label\"><script>"));
    }

    #[test]
    fn empty_dashboard_shows_placeholder() {
        let page = dashboard_page(&[]);
        assert!(page.contains("No leads captured yet."));
    }
}
