//! Static HTML for the form, result and error pages.

const STYLE: &str = "body{font-family:sans-serif;max-width:32rem;margin:2rem auto}\
label{display:block;margin-top:.75rem}input,select{width:100%;padding:.3rem}\
button{margin-top:1rem;padding:.4rem 1rem}.error{color:#a00}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// The input form posted to `/predict`.
pub fn index() -> String {
    layout(
        "Insurance charge estimate",
        r#"<h1>Insurance charge estimate</h1>
<form action="/predict" method="post">
  <label>Age <input type="number" name="age" min="1" required></label>
  <label>Sex
    <select name="sex">
      <option value="male">Male</option>
      <option value="female">Female</option>
    </select>
  </label>
  <label>BMI <input type="number" name="bmi" step="0.01" min="0.01" required></label>
  <label>Children <input type="number" name="children" min="0" value="0" required></label>
  <label>Smoker
    <select name="smoker">
      <option value="no">No</option>
      <option value="yes">Yes</option>
    </select>
  </label>
  <label>Region
    <select name="region">
      <option value="northeast">Northeast</option>
      <option value="northwest">Northwest</option>
      <option value="southeast">Southeast</option>
      <option value="southwest">Southwest</option>
    </select>
  </label>
  <button type="submit">Predict</button>
</form>"#,
    )
}

/// Result page showing the predicted charge.
pub fn result(prediction: f64) -> String {
    layout(
        "Prediction",
        &format!(
            "<h1>Predicted charges</h1>\n<p id=\"prediction\">{prediction:.2}</p>\n\
             <p><a href=\"/\">Make another prediction</a></p>"
        ),
    )
}

/// Error page; `message` is escaped before rendering.
pub fn error(message: &str) -> String {
    layout(
        "Error",
        &format!(
            "<h1>Could not make a prediction</h1>\n<p class=\"error\">{}</p>\n\
             <p><a href=\"/\">Back to the form</a></p>",
            escape(message)
        ),
    )
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
