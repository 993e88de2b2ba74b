//! Demo islands: a lazily loaded navbar and a birthday greeting.
//!
//! `/greeting` renders a placeholder that, once loaded in the browser,
//! fetches `/greeting/hi`; that handler computes a payload from the
//! `person` prop and today's date.

use std::sync::Arc;

use axum::http::header;
use axum::response::IntoResponse;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::context::Props;
use crate::error::{IslandError, IslandResult};
use crate::island::Island;
use crate::payload::Payload;
use crate::routing::{Endpoint, HttpMethod, IslandRouter};

/// Source of "today" for the greeting handler.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub birthday: NaiveDate,
}

impl Person {
    pub fn jane_doe() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            age: 28,
            birthday: NaiveDate::from_ymd_opt(1995, 12, 31).unwrap_or_default(),
        }
    }
}

pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().date_naive())
}

/// Same month and day, any year.
pub fn is_birthday(today: NaiveDate, birthday: NaiveDate) -> bool {
    today.month() == birthday.month() && today.day() == birthday.day()
}

/// `{age, isBirthday: true}` on the birthday, `{isBirthday: false}` otherwise.
pub fn birthday_payload(person: &Person, today: NaiveDate) -> Payload {
    let mut payload = Payload::new();
    let birthday = is_birthday(today, person.birthday);
    if birthday {
        payload.set("age", person.age + 1);
    }
    payload.set("isBirthday", birthday);
    payload
}

pub fn hello_island() -> IslandResult<Island> {
    let mut island = Island::new("navbar", render_hello)?;
    island.add_props([
        ("ID", json!("helloID")),
        ("classes", json!("hello greeting")),
        ("url", json!("/greeting/hi")),
        ("target", json!("this")),
        ("swap", json!("innerHTML")),
        ("trigger", json!("load")),
    ])?;
    Ok(island)
}

pub fn greeting_island() -> IslandResult<Island> {
    let mut island = Island::new("greeting", render_greeting)?;
    island.add_prop("person", Person::jane_doe())?;
    Ok(island)
}

/// Both demo endpoints, with `clock` deciding the date.
pub fn router(clock: Clock) -> IslandResult<IslandRouter> {
    let mut router = IslandRouter::new();
    router
        .add_endpoint(Endpoint::new("/greeting").handler(HttpMethod::Get, hello, hello_island()?))?
        .add_endpoint(Endpoint::new("/greeting/hi").handler(
            HttpMethod::Get,
            move |props: Props| greet(props, clock.clone()),
            greeting_island()?,
        ))?;
    Ok(router)
}

async fn hello(props: Props) -> impl IntoResponse {
    props.render(Payload::new())
}

async fn greet(props: Props, clock: Clock) -> Result<impl IntoResponse, IslandError> {
    let person: Person = props.get("person")?;
    let body = birthday_payload(&person, clock()).marshal()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

fn text<'a>(data: &'a Map<String, Value>, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn render_hello(data: &Map<String, Value>) -> Vec<u8> {
    format!(
        r#"<div id="{}" class="{}" hx-get="{}" hx-target="{}" hx-swap="{}" hx-trigger="{}"></div>"#,
        escape(text(data, "ID")),
        escape(text(data, "classes")),
        escape(text(data, "url")),
        escape(text(data, "target")),
        escape(text(data, "swap")),
        escape(text(data, "trigger")),
    )
    .into_bytes()
}

fn render_greeting(data: &Map<String, Value>) -> Vec<u8> {
    let person = data.get("person").cloned().map(serde_json::from_value::<Person>);
    let Some(Ok(person)) = person else {
        return b"<p>Hello!</p>".to_vec();
    };
    let name = escape(&person.name);
    if data.get("isBirthday").and_then(Value::as_bool).unwrap_or(false) {
        let age = data.get("age").and_then(Value::as_u64).unwrap_or(u64::from(person.age));
        format!("<p>Happy birthday, {name}! You are {age} today.</p>").into_bytes()
    } else {
        format!("<p>Hello, {name}!</p>").into_bytes()
    }
}
