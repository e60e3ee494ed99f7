//! Template engine setup and HTML templates.

use once_cell::sync::Lazy;
use tera::{Context, Tera};

use crate::error::Result;

/// Global template engine instance with embedded templates.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();

    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("cars/detail.html", CAR_DETAIL_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
    ])
    .expect("Failed to load templates");

    tera
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String> {
    Ok(TEMPLATES.render(template, context)?)
}

// =============================================================================
// Embedded Templates
// =============================================================================

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="it">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Magazzino{% endblock %}</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            background: #f6f6f4;
            color: #1c1c1c;
            line-height: 1.5;
        }
        a { color: inherit; }
        .header { border-bottom: 1px solid #ddd; padding: 16px 32px; background: #fff; }
        .logo { font-weight: 600; text-decoration: none; }
        .container { max-width: 960px; margin: 0 auto; padding: 32px; }
        h1 { font-size: 28px; margin-bottom: 24px; }
        h2 { font-size: 13px; text-transform: uppercase; letter-spacing: 0.05em; color: #666; margin: 24px 0 12px; }
        .card { background: #fff; border: 1px solid #ddd; border-radius: 8px; overflow: hidden; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 10px 16px; border-bottom: 1px solid #eee; }
        th { font-weight: 500; color: #666; width: 30%; }
        tr:last-child th, tr:last-child td { border-bottom: none; }
        .badge { font-size: 11px; padding: 2px 8px; border-radius: 100px; background: #e8f2e8; color: #2b6b2b; }
        .empty { padding: 24px 16px; color: #888; }
    </style>
</head>
<body>
    <header class="header">
        <a href="/" class="logo">Magazzino Filtri</a>
    </header>
    <main class="container">
        {% block content %}{% endblock %}
    </main>
</body>
</html>"##;

const CAR_DETAIL_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ page_title }}{% endblock %}
{% block content %}
<h1>{{ car.display }}</h1>

<div class="card">
    <table>
        <tr><th>{{ car_labels.make }}</th><td>{{ car.make }}</td></tr>
        <tr><th>{{ car_labels.model }}</th><td>{{ car.model }}</td></tr>
        <tr><th>{{ car_labels.year }}</th><td>{{ car.year }}</td></tr>
        <tr><th>{{ car_labels.engine }}</th><td>{{ car.engine_label }}</td></tr>
        <tr><th>{{ car_labels.cylinders }}</th><td>{{ car.cylinders }}</td></tr>
        <tr><th>{{ car_labels.oil_quantity }}</th><td>{{ car.oil_quantity }}</td></tr>
        <tr><th>{{ car_labels.oil_specific }}</th><td>{{ car.oil_specific }}</td></tr>
    </table>
</div>

<h2>{{ filters_heading }}</h2>
<div class="card">
    {% if filters | length == 0 %}
    <p class="empty">Nessun filtro associato.</p>
    {% else %}
    <table>
        <tr>
            <th>{{ filter_labels.code }}</th>
            <th>{{ filter_labels.typology }}</th>
            <th>{{ filter_labels.primary }}</th>
            <th>{{ filter_labels.quantity }}</th>
        </tr>
        {% for filter in filters %}
        <tr>
            <td>{{ filter.code }}</td>
            <td>{{ filter.typology_label }}</td>
            <td>{% if filter.primary == "Si" %}<span class="badge">Si</span>{% else %}No{% endif %}</td>
            <td>{{ filter.quantity }}</td>
        </tr>
        {% endfor %}
    </table>
    {% endif %}
</div>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Errore - Magazzino{% endblock %}
{% block content %}
<div class="card">
    <div style="padding: 48px; text-align: center;">
        <h1 style="margin-bottom: 16px;">Pagina non trovata</h1>
        <p>{{ message }}</p>
        <p style="margin-top: 24px;"><a href="/">Torna alla home</a></p>
    </div>
</div>
{% endblock %}"##;
