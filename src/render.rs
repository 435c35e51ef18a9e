//! Terminal tables for dashboard data.

use chrono::{DateTime, Local, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use hams_dashboard::models::{
    animal::{
        Animal, AnimalAuditWithDetails, AnimalFeed, AnimalHealthLogWithDetails, AnimalWithCurrentEvent,
        AnimalWithEvents, RestingAnimal,
    },
    event::{EventType, EventWithCount, EventWithDetails, EventWithDetailsAndComments, UpcomingLiveEvents},
    user::{Role, User, UserShort, UserWithEvents},
    zoo::{Group, Zoo},
};
use hams_dashboard::services::status::{StatusColor, StatusDetail, StatusIndex, StatusLine};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| header_cell(h)));
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn when(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn when_opt(at: Option<DateTime<Utc>>) -> String {
    at.map(when).unwrap_or_else(|| "N/A".to_string())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn listed<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

pub fn status_cell(line: &StatusLine) -> Cell {
    let cell = Cell::new(line.render());
    match line.badge.color {
        StatusColor::Green => cell.fg(Color::Green),
        StatusColor::Red => cell.fg(Color::Red),
        StatusColor::Default => cell,
    }
}

pub fn animals(animals: &[Animal]) -> Table {
    let mut t = table(&["ID", "Name", "Species", "Tier", "Handling", "Checkouts today", "Zoo"]);
    for a in animals {
        t.add_row(vec![
            Cell::new(a.id),
            Cell::new(&a.name),
            Cell::new(&a.species),
            Cell::new(a.tier),
            Cell::new(if a.handling_enabled { "yes" } else { "no" }),
            Cell::new(format!("{}/{}", a.daily_checkout_count, a.max_daily_checkouts)),
            Cell::new(a.zoo_id),
        ]);
    }
    t
}

/// Every animal of the index with a compact status line
pub fn statuses(index: &StatusIndex, animals: &[Animal]) -> Table {
    let mut t = table(&["ID", "Name", "Species", "Status"]);
    for a in animals {
        t.add_row(vec![
            Cell::new(a.id),
            Cell::new(&a.name),
            Cell::new(&a.species),
            status_cell(&index.line(a.id, StatusDetail::Compact)),
        ]);
    }
    t
}

pub fn animal_details(details: &AnimalWithEvents, status: &StatusLine) -> Table {
    let a = &details.animal;
    let mut t = table(&["Field", "Value"]);
    t.add_row(vec![Cell::new("Name"), Cell::new(&a.name)]);
    t.add_row(vec![Cell::new("Species"), Cell::new(&a.species)]);
    t.add_row(vec![Cell::new("Status"), status_cell(status)]);
    t.add_row(vec![Cell::new("Zoo"), Cell::new(&details.zoo.name)]);
    t.add_row(vec![Cell::new("Tier"), Cell::new(a.tier)]);
    t.add_row(vec![Cell::new("Description"), Cell::new(or_dash(a.description.as_deref()))]);
    t.add_row(vec![
        Cell::new("Checkouts today"),
        Cell::new(format!("{}/{}", details.daily_checkout_count, a.max_daily_checkouts)),
    ]);
    t.add_row(vec![
        Cell::new("Hours out today"),
        Cell::new(format!("{:.1}/{}", details.daily_checkout_duration, a.max_daily_checkout_hours)),
    ]);
    t.add_row(vec![Cell::new("Rest time (h)"), Cell::new(a.rest_time)]);
    t.add_row(vec![Cell::new("Last checkin"), Cell::new(when_opt(a.last_checkin_time))]);
    for (label, events) in [
        ("Current events", &details.current_events),
        ("Upcoming events", &details.upcoming_events),
        ("Past events", &details.past_events),
    ] {
        let names: Vec<&str> = events.iter().map(|e| e.event.name.as_str()).collect();
        t.add_row(vec![Cell::new(label), Cell::new(listed(&names))]);
    }
    t
}

pub fn audits(entries: &[AnimalAuditWithDetails]) -> Table {
    let mut t = table(&["When", "Action", "Field", "Old", "New", "By"]);
    for e in entries {
        t.add_row(vec![
            Cell::new(when(e.audit.changed_at)),
            Cell::new(&e.audit.action),
            Cell::new(&e.audit.changed_field),
            Cell::new(or_dash(e.audit.old_value.as_deref())),
            Cell::new(or_dash(e.audit.new_value.as_deref())),
            Cell::new(e.user.full_name()),
        ]);
    }
    t
}

pub fn health_log(entries: &[AnimalHealthLogWithDetails]) -> Table {
    let mut t = table(&["ID", "When", "Details", "By"]);
    for e in entries {
        t.add_row(vec![
            Cell::new(e.log.id),
            Cell::new(when(e.log.logged_at)),
            Cell::new(&e.log.details),
            Cell::new(e.user.full_name()),
        ]);
    }
    t
}

pub fn checked_out(entries: &[AnimalWithCurrentEvent]) -> Table {
    let mut t = table(&["ID", "Name", "Event", "Until"]);
    for e in entries {
        let (event, until) = match &e.current_event {
            Some(current) => (current.event.name.clone(), when(current.event.end_at)),
            None => ("-".to_string(), "-".to_string()),
        };
        t.add_row(vec![
            Cell::new(e.animal.id),
            Cell::new(&e.animal.name),
            Cell::new(event),
            Cell::new(until),
        ]);
    }
    t
}

pub fn resting(entries: &[RestingAnimal]) -> Table {
    let mut t = table(&["ID", "Name", "Status", "Checkouts today", "Hours this week"]);
    for e in entries {
        let status = StatusLine::new(Some(&e.animal_status), StatusDetail::Verbose);
        t.add_row(vec![
            Cell::new(e.animal_status.animal.id),
            Cell::new(&e.animal_status.animal.name),
            status_cell(&status),
            Cell::new(e.daily_checkout_count),
            Cell::new(format!("{:.1}", e.weekly_event_activity_hours)),
        ]);
    }
    t
}

pub fn feed(entries: &[AnimalFeed]) -> Table {
    let mut t = table(&["When", "Animal", "Entry", "By"]);
    for e in entries {
        t.add_row(vec![
            Cell::new(when(e.logged_at)),
            Cell::new(&e.name),
            Cell::new(&e.description),
            Cell::new(&e.by),
        ]);
    }
    t
}

pub fn events(entries: &[EventWithCount]) -> Table {
    let mut t = table(&["ID", "Name", "Type", "Start", "End", "Animals"]);
    for e in entries {
        t.add_row(vec![
            Cell::new(e.event.id),
            Cell::new(&e.event.name),
            Cell::new(&e.event_type.name),
            Cell::new(when(e.event.start_at)),
            Cell::new(when(e.event.end_at)),
            Cell::new(e.animal_count),
        ]);
    }
    t
}

pub fn event(details: &EventWithDetails) -> Table {
    let mut t = table(&["Field", "Value"]);
    t.add_row(vec![Cell::new("Name"), Cell::new(&details.event.name)]);
    t.add_row(vec![Cell::new("Type"), Cell::new(&details.event_type.name)]);
    t.add_row(vec![Cell::new("Zoo"), Cell::new(&details.zoo.name)]);
    t.add_row(vec![Cell::new("Start"), Cell::new(when(details.event.start_at))]);
    t.add_row(vec![Cell::new("End"), Cell::new(when(details.event.end_at))]);
    t.add_row(vec![Cell::new("Description"), Cell::new(&details.event.description)]);
    let animals: Vec<String> = details.animals.iter().map(|a| format!("{} (#{})", a.name, a.id)).collect();
    t.add_row(vec![Cell::new("Animals"), Cell::new(listed(&animals))]);
    let handlers: Vec<String> = details.users.iter().map(|u| format!("{} (#{})", u.full_name(), u.id)).collect();
    t.add_row(vec![Cell::new("Handlers"), Cell::new(listed(&handlers))]);
    t
}

/// One event card: animals with their checkout times and verbose status
pub fn event_card(card: &EventWithDetailsAndComments, index: &StatusIndex) -> Table {
    let mut t = table(&["Animal", "Checked out", "Checked in", "Status"]);
    for a in &card.animals {
        t.add_row(vec![
            Cell::new(format!("{} (#{})", a.animal.name, a.animal.id)),
            Cell::new(when_opt(a.animal_event.checked_out)),
            Cell::new(when_opt(a.animal_event.checked_in)),
            status_cell(&index.line(a.animal.id, StatusDetail::Verbose)),
        ]);
    }
    t
}

pub fn card_heading(card: &EventWithDetailsAndComments) -> String {
    let handlers: Vec<String> = card.users.iter().map(|u| u.user.full_name()).collect();
    format!(
        "#{} {} [{}] {} - {} | handlers: {}",
        card.event.id,
        card.event.name,
        card.event_type.name,
        when(card.event.start_at),
        when(card.event.end_at),
        listed(&handlers)
    )
}

pub fn comments(card: &EventWithDetailsAndComments) -> Option<Table> {
    if card.comments.is_empty() {
        return None;
    }
    let mut t = table(&["When", "By", "Comment"]);
    for c in &card.comments {
        t.add_row(vec![
            Cell::new(when_opt(c.comment.created_at)),
            Cell::new(c.user.full_name()),
            Cell::new(&c.comment.comment),
        ]);
    }
    Some(t)
}

pub fn upcoming_live(split: &UpcomingLiveEvents) -> Table {
    let mut t = table(&["", "ID", "Name", "Start", "End", "Animals"]);
    let rows = split
        .live
        .iter()
        .map(|e| ("live", e))
        .chain(split.upcoming.iter().map(|e| ("upcoming", e)));
    for (state, e) in rows {
        let state_cell = if state == "live" {
            Cell::new(state).fg(Color::Green)
        } else {
            Cell::new(state)
        };
        t.add_row(vec![
            state_cell,
            Cell::new(e.event.id),
            Cell::new(&e.event.name),
            Cell::new(when(e.event.start_at)),
            Cell::new(when(e.event.end_at)),
            Cell::new(e.animals.len()),
        ]);
    }
    t
}

pub fn users(entries: &[User]) -> Table {
    let mut t = table(&["ID", "Name", "Username", "Email", "Role", "Tier", "Group"]);
    for u in entries {
        t.add_row(vec![
            Cell::new(u.id),
            Cell::new(u.full_name()),
            Cell::new(&u.username),
            Cell::new(&u.email),
            Cell::new(u.role_name()),
            Cell::new(u.tier),
            Cell::new(u.group.as_ref().map(|g| g.title.as_str()).unwrap_or("-")),
        ]);
    }
    t
}

pub fn user(user: &User) -> Table {
    let mut t = table(&["Field", "Value"]);
    t.add_row(vec![Cell::new("Name"), Cell::new(user.full_name())]);
    t.add_row(vec![Cell::new("Username"), Cell::new(&user.username)]);
    t.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    t.add_row(vec![Cell::new("Role"), Cell::new(user.role_name())]);
    t.add_row(vec![Cell::new("Tier"), Cell::new(user.tier)]);
    t.add_row(vec![
        Cell::new("Zoo"),
        Cell::new(user.zoo.as_ref().map(|z| z.name.as_str()).unwrap_or("-")),
    ]);
    let permissions: Vec<&str> = user
        .role
        .iter()
        .flat_map(|r| r.permissions.iter().map(|p| p.name.as_str()))
        .collect();
    t.add_row(vec![Cell::new("Permissions"), Cell::new(listed(&permissions))]);
    t
}

pub fn user_events(details: &UserWithEvents) -> Table {
    let mut t = table(&["", "ID", "Event", "Start", "End"]);
    for (state, events) in [
        ("current", &details.current_events),
        ("upcoming", &details.upcoming_events),
        ("past", &details.past_events),
    ] {
        for e in events {
            t.add_row(vec![
                Cell::new(state),
                Cell::new(e.event.id),
                Cell::new(&e.event.name),
                Cell::new(when(e.event.start_at)),
                Cell::new(when(e.event.end_at)),
            ]);
        }
    }
    t
}

pub fn handlers(entries: &[UserShort]) -> Table {
    let mut t = table(&["ID", "Name", "Username", "Tier"]);
    for u in entries {
        t.add_row(vec![
            Cell::new(u.id),
            Cell::new(u.full_name()),
            Cell::new(&u.username),
            Cell::new(u.tier),
        ]);
    }
    t
}

pub fn roles(entries: &[Role]) -> Table {
    let mut t = table(&["Role", "Description", "Permissions"]);
    for r in entries {
        let permissions: Vec<&str> = r.permissions.iter().map(|p| p.name.as_str()).collect();
        t.add_row(vec![
            Cell::new(&r.name),
            Cell::new(or_dash(r.description.as_deref())),
            Cell::new(permissions.join(", ")),
        ]);
    }
    t
}

pub fn zoos(entries: &[Zoo]) -> Table {
    let mut t = table(&["ID", "Name", "Location"]);
    for z in entries {
        t.add_row(vec![Cell::new(z.id), Cell::new(&z.name), Cell::new(&z.location)]);
    }
    t
}

pub fn groups(entries: &[Group]) -> Table {
    let mut t = table(&["ID", "Title", "Zoo"]);
    for g in entries {
        t.add_row(vec![Cell::new(g.id), Cell::new(&g.title), Cell::new(g.zoo_id)]);
    }
    t
}

pub fn event_types(entries: &[EventType]) -> Table {
    let mut t = table(&["ID", "Name", "Zoo", "Group"]);
    for e in entries {
        t.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.name),
            Cell::new(e.zoo_id),
            Cell::new(e.group_id.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())),
        ]);
    }
    t
}
