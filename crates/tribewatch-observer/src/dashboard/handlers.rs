//! Dashboard endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML page with the rendered regions |
//! | `GET` | `/api/view` | Current rendered view as JSON |
//! | `GET` | `/api/status` | Sync counters and snapshot source |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use tribewatch_render::{Block, Region, Slot, ViewDocument};

use crate::dashboard::state::DashboardState;

// ---------------------------------------------------------------------------
// GET / -- host page
// ---------------------------------------------------------------------------

/// Serve the host page with the latest rendered view inlined.
pub async fn index(State(state): State<Arc<DashboardState>>) -> impl IntoResponse {
    let view = state.current_view();
    Html(render_page(&view, state.refresh_secs()))
}

/// Build the host page for a view.
///
/// Element ids match the renderer's slot and region ids so the page can be
/// scripted against the same insertion points. All text is HTML-escaped.
pub fn render_page(view: &ViewDocument, refresh_secs: u64) -> String {
    let tick = escape_html(view.text(Slot::Tick));
    let weather = escape_html(view.text(Slot::Weather));
    let tribes = region_html(view, Region::Tribes);
    let agents = region_html(view, Region::Agents);
    let timeline = region_html(view, Region::Timeline);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="{refresh_secs}">
    <title>Tribewatch</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 960px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        h2 {{ color: #8b949e; border-bottom: 1px solid #30363d; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        .tribe, .agent {{
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 0.5rem 1rem;
            margin: 0.5rem 0;
        }}
        .tribe h3 {{ color: #7ee787; margin: 0.25rem 0; }}
        .timeline-item {{ padding: 0.2rem 0; }}
        p {{ margin: 0.2rem 0; }}
    </style>
</head>
<body>
    <h1>Tribewatch</h1>
    <div>
        <div class="metric">
            <div class="label">Tick</div>
            <div class="value" id="tick">{tick}</div>
        </div>
        <div class="metric">
            <div class="label">Weather</div>
            <div class="value" id="weather">{weather}</div>
        </div>
    </div>
    <h2>Tribes</h2>
    <div id="tribes">{tribes}</div>
    <h2>Agents</h2>
    <div id="agents">{agents}</div>
    <h2>Timeline</h2>
    <div id="timeline">{timeline}</div>
</body>
</html>"#
    )
}

fn region_html(view: &ViewDocument, region: Region) -> String {
    let mut out = String::new();
    for block in view.blocks(region) {
        out.push_str(&block_html(block));
    }
    out
}

fn block_html(block: &Block) -> String {
    let mut out = String::new();
    let _ = write!(out, r#"<div class="{}">"#, escape_html(&block.class));
    match (&block.title, block.lines.split_first()) {
        // Single-line blocks carry their title inline.
        (Some(title), Some((line, []))) => {
            let _ = write!(
                out,
                "<p><strong>{}</strong> {}</p>",
                escape_html(title),
                escape_html(line)
            );
        }
        (title, _) => {
            if let Some(title) = title {
                let _ = write!(out, "<h3>{}</h3>", escape_html(title));
            }
            for line in &block.lines {
                let _ = write!(out, "<p>{}</p>", escape_html(line));
            }
        }
    }
    out.push_str("</div>");
    out
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

// ---------------------------------------------------------------------------
// GET /api/view
// ---------------------------------------------------------------------------

/// Return the latest rendered view.
pub async fn get_view(State(state): State<Arc<DashboardState>>) -> impl IntoResponse {
    Json(state.current_view())
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Return sync counters, the snapshot source, and the poll interval.
pub async fn get_status(State(state): State<Arc<DashboardState>>) -> impl IntoResponse {
    let stats = state.stats.snapshot();
    let revision = state.view.borrow().revision();
    Json(serde_json::json!({
        "source": state.source,
        "poll_interval_ms": u64::try_from(state.poll_interval.as_millis()).unwrap_or(u64::MAX),
        "revision": revision,
        "sync": stats,
    }))
}

#[cfg(test)]
mod tests {
    use tribewatch_render::RenderTarget;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Fire" & 'Wheel'</b>"#),
            "&lt;b&gt;&quot;Fire&quot; &amp; &#39;Wheel&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_exposes_insertion_points() {
        let mut view = ViewDocument::new();
        view.set_text(Slot::Tick, String::from("7"));
        view.set_text(Slot::Weather, String::from("Storm (x0.8)"));
        view.append(
            Region::Tribes,
            Block::new("tribe")
                .with_title("Ashfolk")
                .line("ID: 1")
                .line("Tech: None"),
        );
        view.append(Region::Timeline, Block::new("timeline-item").line("[7] storm hit"));

        let page = render_page(&view, 1);
        for id in ["tick", "weather", "tribes", "agents", "timeline"] {
            assert!(page.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
        assert!(page.contains(r#"<div class="value" id="tick">7</div>"#));
        assert!(page.contains("<h3>Ashfolk</h3><p>ID: 1</p><p>Tech: None</p>"));
        assert!(page.contains(r#"<div class="timeline-item"><p>[7] storm hit</p></div>"#));
        assert!(page.contains(r#"content="1""#));
    }

    #[test]
    fn block_text_is_escaped() {
        let block = Block::new("agent").with_title("<script>").line("a & b");
        assert_eq!(
            block_html(&block),
            r#"<div class="agent"><p><strong>&lt;script&gt;</strong> a &amp; b</p></div>"#
        );
    }
}
