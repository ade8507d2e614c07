use axum::{
    extract::{Path, State},
    response::Html,
    routing::post,
    Form, Router,
};
use chrono::{Datelike, NaiveDate};
use hypertext::{prelude::*, Raw};
use serde::Deserialize;

use crate::calendar::{month_name, CalendarCell};
use crate::config;
use crate::state::{regenerate, PlannerInputs, SharedState};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/tasks/add", post(add_task))
        .route("/tasks/{index}", axum::routing::delete(remove_task))
        .route("/sequence/start", post(start_sequence))
        .route("/month/prev", post(month_prev))
        .route("/month/next", post(month_next))
        .route("/reset", post(reset))
}

// GET / - The planner page
pub async fn planner_page(State(state): State<SharedState>) -> Html<String> {
    Html(render_current(&state, None))
}

#[derive(Deserialize)]
pub struct NewTaskForm {
    pub label: String,
}

// POST /planner/tasks/add - Append a task to the rotation
async fn add_task(State(state): State<SharedState>, Form(form): Form<NewTaskForm>) -> Html<String> {
    state.lock().unwrap().add_task(&form.label);
    Html(render_current(&state, None))
}

// DELETE /planner/tasks/:index - Remove a task by its position
async fn remove_task(State(state): State<SharedState>, Path(index): Path<usize>) -> Html<String> {
    state.lock().unwrap().remove_task(index);
    Html(render_current(&state, None))
}

#[derive(Deserialize)]
pub struct StartSequenceForm {
    pub start_day: String,
}

// POST /planner/sequence/start - Fix the start day and activate
async fn start_sequence(
    State(state): State<SharedState>,
    Form(form): Form<StartSequenceForm>,
) -> Html<String> {
    let raw = form.start_day.trim().to_string();
    let error = match raw.parse::<u32>() {
        Ok(day) => state.lock().unwrap().start_sequence(day).err(),
        Err(_) => Some(format!("'{}' is not a valid day", raw)),
    };
    Html(render_current(&state, error.as_deref()))
}

// POST /planner/month/prev - Show the previous month
async fn month_prev(State(state): State<SharedState>) -> Html<String> {
    state.lock().unwrap().navigate(-1);
    Html(render_current(&state, None))
}

// POST /planner/month/next - Show the next month
async fn month_next(State(state): State<SharedState>) -> Html<String> {
    state.lock().unwrap().navigate(1);
    Html(render_current(&state, None))
}

// POST /planner/reset - Clear everything and return to today's month
async fn reset(State(state): State<SharedState>) -> Html<String> {
    state.lock().unwrap().reset();
    Html(render_current(&state, None))
}

// Snapshot the state, regenerate the grid, and render the full page
fn render_current(state: &SharedState, error: Option<&str>) -> String {
    let inputs = state.lock().unwrap().snapshot();
    let cells = regenerate(&inputs);
    render_planner_page(&inputs, &cells, error)
}

fn render_planner_page(
    inputs: &PlannerInputs,
    cells: &[CalendarCell],
    error: Option<&str>,
) -> String {
    let month_title = format!("{} {}", month_name(inputs.month), inputs.year);
    let grid_html = render_calendar_grid(cells);
    let show_start_controls = !inputs.sequence_started && !inputs.tasks.is_empty();
    let error_message = error.unwrap_or("");
    let start_note = match inputs.start_day {
        Some(day) if inputs.sequence_started => {
            format!("Sequence running from day {} of the displayed month.", day)
        }
        _ => String::new(),
    };
    let task_items: Vec<String> = inputs
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| render_task_item(index, task))
        .collect();

    let html = maud! {
        !DOCTYPE
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Taskcycle" }
                link rel="stylesheet" href="/static/app.css";
                script src="https://unpkg.com/htmx.org@2.0.4" {}
            }
            body {
                div .planner id="planner-page" {
                    div .planner-header {
                        h1 { (month_title) }
                        div .planner-nav {
                            (Raw::dangerously_create(
                                r##"<button class="btn" hx-post="/planner/month/prev" hx-target="#planner-page" hx-swap="outerHTML">Previous</button>"##
                            ))
                            (Raw::dangerously_create(
                                r##"<button class="btn" hx-post="/planner/month/next" hx-target="#planner-page" hx-swap="outerHTML">Next</button>"##
                            ))
                            (Raw::dangerously_create(
                                r##"<button class="btn btn-reset" hx-post="/planner/reset" hx-target="#planner-page" hx-swap="outerHTML">Reset</button>"##
                            ))
                        }
                    }

                    // Task input
                    (Raw::dangerously_create(
                        r##"<form class="task-entry" hx-post="/planner/tasks/add" hx-target="#planner-page" hx-swap="outerHTML">
                            <input type="text" name="label" placeholder="Enter a task" autocomplete="off">
                            <button class="btn btn-default" type="submit">Add Task</button>
                        </form>"##
                    ))

                    // Start day entry, shown until the sequence is activated
                    @if show_start_controls {
                        div .start-controls {
                            (Raw::dangerously_create(
                                r##"<form class="start-form" hx-post="/planner/sequence/start" hx-target="#planner-page" hx-swap="outerHTML">
                                    <input type="number" name="start_day" min="1" max="31" placeholder="Start day (1-31)">
                                    <button class="btn btn-default" type="submit">Start Sequence</button>
                                </form>"##
                            ))
                        }
                    }
                    @if !error_message.is_empty() {
                        div .form-error-message { (error_message) }
                    }
                    @if !start_note.is_empty() {
                        p .start-note { (start_note) }
                    }

                    // Task list
                    section .task-section {
                        h3 { "Task order" }
                        @if inputs.tasks.is_empty() {
                            p .empty-list { "No tasks yet." }
                        } @else {
                            ul .task-list {
                                (Raw::dangerously_create(&task_items.join("\n")))
                            }
                        }
                    }

                    // Pattern legend
                    div .sequence-info {
                        h4 { "Sequence pattern" }
                        ul {
                            li { "Tasks rotate one per day through a 3-day block" }
                            li { "Then through a 5-day block" }
                            li { "Then through a 7-day block" }
                            li { "The pattern repeats from the start" }
                        }
                    }

                    // Calendar grid
                    (Raw::dangerously_create(&grid_html))
                }
            }
        }
    };

    html.render().into_inner()
}

fn render_task_item(index: usize, task: &str) -> String {
    let remove_button = format!(
        r##"<button class="btn task-remove" hx-delete="/planner/tasks/{}" hx-target="#planner-page" hx-swap="outerHTML">Remove</button>"##,
        index
    );

    maud! {
        li .task-list-item {
            span .task-name { (format!("{}. {}", index + 1, task)) }
            (Raw::dangerously_create(&remove_button))
        }
    }
    .render()
    .into_inner()
}

pub fn render_calendar_grid(cells: &[CalendarCell]) -> String {
    let today = config::today();

    let mut rows = String::new();

    // Header row
    rows.push_str(r#"<div class="calendar-header-row">"#);
    for day_name in &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        rows.push_str(&format!(
            r#"<div class="calendar-header-cell">{}</div>"#,
            day_name
        ));
    }
    rows.push_str("</div>");

    // Day cells, wrapped to weeks of seven
    let mut cell_count = 0;
    rows.push_str(r#"<div class="calendar-row">"#);
    for cell in cells {
        if cell_count > 0 && cell_count % 7 == 0 {
            rows.push_str("</div>");
            rows.push_str(r#"<div class="calendar-row">"#);
        }
        rows.push_str(&render_cell(cell, today));
        cell_count += 1;
    }

    // Fill remaining cells
    while cell_count % 7 != 0 {
        rows.push_str(r#"<div class="calendar-cell calendar-cell-empty"></div>"#);
        cell_count += 1;
    }
    rows.push_str("</div>");

    format!(
        r#"<div class="calendar"><div class="calendar-grid">{}</div></div>"#,
        rows
    )
}

fn render_cell(cell: &CalendarCell, today: NaiveDate) -> String {
    let Some(date) = cell.date else {
        return r#"<div class="calendar-cell calendar-cell-empty"></div>"#.to_string();
    };

    let mut cell_class = "calendar-cell".to_string();
    if date == today {
        cell_class.push_str(" calendar-cell-today");
    }

    let task_html = match &cell.assignment {
        Some(assignment) => maud! {
            div class=(format!("calendar-task calendar-task-{}", assignment.interval)) {
                div .calendar-task-name { (assignment.task) }
                div .calendar-task-label { (assignment.sequence_label) }
            }
        }
        .render()
        .into_inner(),
        None => String::new(),
    };

    maud! {
        div class=(cell_class) {
            span .calendar-day-number { (date.day()) }
            (Raw::dangerously_create(&task_html))
        }
    }
    .render()
    .into_inner()
}
