use std::collections::BTreeMap;

use axum::{response::Html, routing::get, Router};
use chrono::NaiveDate;
use hypertext::{prelude::*, Raw};

use crate::calendar::build_grid;
use crate::pages::render_calendar_grid;
use crate::scheduler::schedule;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/calendar", get(calendar_scenarios))
}

// GET /storybook/calendar - Show the grid over canned scenarios
async fn calendar_scenarios() -> Html<String> {
    let tasks = vec![
        "Water plants".to_string(),
        "Vacuum".to_string(),
        "Laundry".to_string(),
    ];
    let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let range_end = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();

    let scheduled = render_calendar_grid(&build_grid(2026, 9, &schedule(&tasks, start, range_end)));
    let empty = render_calendar_grid(&build_grid(2026, 9, &BTreeMap::new()));

    let html = maud! {
        !DOCTYPE
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Calendar - Storybook" }
                link rel="stylesheet" href="/static/app.css";
            }
            body {
                h1 { "Calendar Storybook" }
                p { "Three tasks rotating from September 1st:" }
                div .storybook-grid {
                    (Raw::dangerously_create(&scheduled))
                }
                p { "Empty calendar, no active sequence:" }
                div .storybook-grid {
                    (Raw::dangerously_create(&empty))
                }
            }
        }
    };

    Html(html.render().into_inner())
}
