use crate::domain::model::PredictionResult;

#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub model_loaded: bool,
    pub result: Option<&'a PredictionResult>,
    pub error: Option<String>,
}

pub fn render(view: &PageView<'_>) -> String {
    let mut body = String::new();

    if !view.model_loaded {
        body.push_str(
            r#"<p class="warning">No model is loaded. Predictions are disabled.</p>"#,
        );
    }

    body.push_str(FORM);

    if let Some(result) = view.result {
        body.push_str(&format!(
            r#"<section class="result">
<h2>{}</h2>
<p><strong>Confidence:</strong> {}</p>
<p><strong>Why:</strong> {}</p>
</section>"#,
            escape(result.verdict()),
            escape(&result.confidence_label()),
            escape(&result.explanation()),
        ));
    }

    if let Some(error) = &view.error {
        body.push_str(&format!(r#"<p class="error">{}</p>"#, escape(error)));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Titanic survival predictor</title>
</head>
<body>
<h1>Would you survive the Titanic?</h1>
{}
</body>
</html>"#,
        body
    )
}

const FORM: &str = r#"<form method="post" action="/predict">
<label>Ticket class <select name="pclass"><option>1</option><option>2</option><option selected>3</option></select></label>
<label>Sex <select name="sexo"><option value="female">Female</option><option value="male">Male</option></select></label>
<label>Age <input name="edad" type="number" step="0.1" min="0"></label>
<label>Siblings/spouses aboard <input name="sibsp" type="number" min="0" value="0"></label>
<label>Parents/children aboard <input name="parch" type="number" min="0" value="0"></label>
<label>Fare <input name="tarifa" type="number" step="0.01" min="0"></label>
<label>Embarked <select name="embarcado"><option value="S">Southampton</option><option value="C">Cherbourg</option><option value="Q">Queenstown</option></select></label>
<button type="submit">Predict</button>
</form>"#;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
