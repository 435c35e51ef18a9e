//! Command handlers: each one reads through the query cache or runs a
//! service flow, then prints tables to stdout.

use chrono::{Duration, Local, Utc};

use hams_dashboard::{
    error::{AppError, AppResult},
    models::{
        animal::{AnimalForm, HealthLogForm},
        event::{CommentForm, EventForm, EventTypeForm},
        user::{ChangePasswordForm, LoginForm, SignUpForm, UpdateProfileForm},
        zoo::GroupForm,
    },
    services::{
        assignment::{AssignAction, CheckAction, CheckMode, EventAssignment},
        events::EventAssignees,
        status::{StatusDetail, StatusIndex},
    },
    Dashboard,
};

use crate::cli::{
    AnimalArgs, AnimalChanges, AnimalsCommand, Command, EventArgs, EventTypeArgs, EventTypesCommand,
    EventsCommand, GroupsCommand, ProfileCommand, ReportArgs, UsersCommand,
};
use crate::render;

pub async fn run(dashboard: &Dashboard, command: Command) -> AppResult<()> {
    match command {
        Command::Login(args) => {
            let form = LoginForm {
                username: args.username,
                password: args.password,
            };
            dashboard.services.users.login(&form).await?;
            Ok(())
        }
        Command::Logout => dashboard.services.users.logout().await,
        Command::Signup(args) => {
            let form = SignUpForm {
                first_name: args.first_name,
                last_name: args.last_name,
                username: args.username,
                email: args.email,
                password: args.password,
            };
            dashboard.services.users.signup(&form).await?;
            Ok(())
        }
        Command::Me => {
            let me = dashboard.services.queries.user().await?;
            println!("{}", render::user(&me));
            Ok(())
        }
        Command::Profile(cmd) => profile(dashboard, cmd).await,
        Command::Animals(cmd) => animals(dashboard, cmd).await,
        Command::Events(cmd) => events(dashboard, cmd).await,
        Command::EventTypes(cmd) => event_types(dashboard, cmd).await,
        Command::Groups(cmd) => groups(dashboard, cmd).await,
        Command::Users(cmd) => users(dashboard, cmd).await,
        Command::Roles => {
            let roles = dashboard.services.queries.roles().await?;
            println!("{}", render::roles(&roles));
            Ok(())
        }
        Command::Zoos => {
            let zoos = dashboard.services.queries.zoos().await?;
            println!("{}", render::zoos(&zoos));
            Ok(())
        }
        Command::Upload { path } => {
            let uploaded = dashboard.services.api.upload_file(&path).await?;
            println!("{}", uploaded.file_url);
            Ok(())
        }
        Command::Report(args) => report(dashboard, args).await,
    }
}

async fn profile(dashboard: &Dashboard, cmd: ProfileCommand) -> AppResult<()> {
    let users = &dashboard.services.users;
    match cmd {
        ProfileCommand::Update {
            first_name,
            last_name,
            email,
        } => {
            let me = dashboard.services.queries.user().await?;
            let form = UpdateProfileForm {
                first_name: first_name.unwrap_or(me.first_name),
                last_name: last_name.unwrap_or(me.last_name),
                email: email.unwrap_or(me.email),
            };
            users.update_profile(&form).await?;
        }
        ProfileCommand::Password { current, new, confirm } => {
            let form = ChangePasswordForm {
                current_password: current,
                new_password: new,
                confirm_password: confirm,
            };
            users.change_password(&form).await?;
        }
    }
    Ok(())
}

fn animal_form(args: AnimalArgs) -> AnimalForm {
    AnimalForm {
        name: args.name,
        species: args.species,
        description: args.description,
        image: args.image,
        handling_enabled: args.handling_enabled,
        max_daily_checkout_hours: args.max_daily_checkout_hours,
        max_daily_checkouts: args.max_daily_checkouts,
        rest_time: args.rest_time,
        tier: args.tier.value(),
        zoo_id: args.zoo,
    }
}

fn apply_changes(form: &mut AnimalForm, changes: AnimalChanges) {
    if let Some(v) = changes.name {
        form.name = v;
    }
    if let Some(v) = changes.species {
        form.species = v;
    }
    if let Some(v) = changes.description {
        form.description = v;
    }
    if let Some(v) = changes.image {
        form.image = v;
    }
    if let Some(v) = changes.handling_enabled {
        form.handling_enabled = v;
    }
    if let Some(v) = changes.max_daily_checkout_hours {
        form.max_daily_checkout_hours = v;
    }
    if let Some(v) = changes.max_daily_checkouts {
        form.max_daily_checkouts = v;
    }
    if let Some(v) = changes.rest_time {
        form.rest_time = v;
    }
    if let Some(v) = changes.tier {
        form.tier = v.value();
    }
    if let Some(v) = changes.zoo {
        form.zoo_id = v;
    }
}

async fn animals(dashboard: &Dashboard, cmd: AnimalsCommand) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    let service = &dashboard.services.animals;

    match cmd {
        AnimalsCommand::List => println!("{}", render::animals(&queries.animals().await?)),
        AnimalsCommand::Show { id } => {
            let details = queries.animal_details(id).await?;
            let index = StatusIndex::new(queries.animal_statuses(None).await?);
            let line = index.line(id, StatusDetail::Verbose);
            println!("{}", render::animal_details(&details, &line));
        }
        AnimalsCommand::Status { zoo } => {
            let statuses = queries.animal_statuses(zoo).await?;
            let animals: Vec<_> = statuses.iter().map(|s| s.animal.clone()).collect();
            println!("{}", render::statuses(&StatusIndex::new(statuses), &animals));
        }
        AnimalsCommand::Create(args) => {
            let me = queries.user().await?;
            service.create(&me, &animal_form(args)).await?;
        }
        AnimalsCommand::Update { id, changes } => {
            let me = queries.user().await?;
            let mut form = AnimalForm::from_animal(&queries.animal(id).await?);
            apply_changes(&mut form, changes);
            service.update(&me, id, &form).await?;
        }
        AnimalsCommand::Delete { id } => {
            let me = queries.user().await?;
            service.delete(&me, id).await?;
        }
        AnimalsCommand::Available { id } => {
            let me = queries.user().await?;
            service.set_available(&me, id, true).await?;
        }
        AnimalsCommand::Unavailable { id } => {
            let me = queries.user().await?;
            service.set_available(&me, id, false).await?;
        }
        AnimalsCommand::Audits { id } => {
            println!("{}", render::audits(&queries.animal_audit_log(id).await?));
        }
        AnimalsCommand::HealthLog { id } => {
            println!("{}", render::health_log(&queries.animal_health_log(id).await?));
        }
        AnimalsCommand::AddHealthLog { id, details, log } => {
            let me = queries.user().await?;
            let form = HealthLogForm { details };
            match log {
                Some(log_id) => service.update_health_log(&me, id, log_id, &form).await?,
                None => service.add_health_log(&me, id, &form).await?,
            };
        }
        AnimalsCommand::CheckedOut => {
            println!("{}", render::checked_out(&queries.checked_out_animals().await?));
        }
        AnimalsCommand::Resting => println!("{}", render::resting(&queries.resting_animals().await?)),
        AnimalsCommand::Feed => println!("{}", render::feed(&queries.animal_feed().await?)),
    }
    Ok(())
}

fn event_request(args: EventArgs) -> (EventForm, EventAssignees) {
    let form = EventForm {
        name: args.name,
        description: args.description,
        from: args.from,
        to: args.to.unwrap_or(args.from),
        start_time: args.start,
        end_time: args.end,
        zoo_id: args.zoo,
        event_type_id: args.event_type,
    };
    let assignees = EventAssignees {
        user_ids: args.handlers,
        animal_ids: args.animals,
        checkout_immediately: args.checkout_immediately,
    };
    (form, assignees)
}

async fn events(dashboard: &Dashboard, cmd: EventsCommand) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    let service = &dashboard.services.events;
    let today = Local::now().date_naive();

    match cmd {
        EventsCommand::List => println!("{}", render::events(&queries.events().await?)),
        EventsCommand::Show { id } => println!("{}", render::event(&queries.event(id).await?)),
        EventsCommand::Day { date } => {
            let cards = queries.events_details(date.unwrap_or(today)).await?;
            let index = StatusIndex::new(queries.animal_statuses(None).await?);
            if cards.is_empty() {
                println!("No events");
            }
            for card in &cards {
                println!("{}", render::card_heading(card));
                println!("{}", render::event_card(card, &index));
                if let Some(comments) = render::comments(card) {
                    println!("{}", comments);
                }
            }
        }
        EventsCommand::Upcoming => {
            println!("{}", render::upcoming_live(&queries.upcoming_live_events().await?));
        }
        EventsCommand::Create(args) => {
            let me = queries.user().await?;
            let (form, assignees) = event_request(args);
            service.create(&me, &form, assignees, &Local, today).await?;
        }
        EventsCommand::Update { id, event } => {
            let me = queries.user().await?;
            let (form, assignees) = event_request(event);
            service.update(&me, id, &form, assignees, &Local, today).await?;
        }
        EventsCommand::Delete { id } => {
            let me = queries.user().await?;
            service.delete(&me, id).await?;
        }
        EventsCommand::Comment { id, text } => {
            service.comment(id, &CommentForm { comment: text }).await?;
        }
        EventsCommand::AssignAnimals { id, animals } => {
            let mut card = EventAssignment::from_event(&queries.event(id).await?);
            card.animals_mut().replace(animals);
            match card.animal_action(Utc::now()) {
                AssignAction::Save => {
                    service.save_animals(&mut card).await?;
                }
                AssignAction::Proceed(_) => println!("No changes to save"),
            }
        }
        EventsCommand::AssignHandlers { id, users } => {
            let mut card = EventAssignment::from_event(&queries.event(id).await?);
            card.handlers_mut().replace(users);
            if card.handlers_need_save() {
                service.save_handlers(&mut card).await?;
            } else {
                println!("No changes to save");
            }
        }
        EventsCommand::CheckIn { id, animals } => check(dashboard, id, CheckMode::CheckIn, animals).await?,
        EventsCommand::CheckOut { id, animals } => check(dashboard, id, CheckMode::CheckOut, animals).await?,
    }
    Ok(())
}

/// Walk the event card into its check view and submit the selection.
/// An empty `animals` list selects every assigned animal.
async fn check(dashboard: &Dashboard, event_id: i32, requested: CheckMode, animals: Vec<i32>) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    let me = queries.user().await?;
    let mut card = EventAssignment::from_event(&queries.event(event_id).await?);

    let offered = card
        .enter_check_view(Utc::now())
        .ok_or_else(|| AppError::Validation("Save the animal assignment first".to_string()))?;
    if offered != requested {
        return Err(AppError::Validation(match offered {
            CheckMode::CheckIn => "The event has started, animals can only be checked in".to_string(),
            CheckMode::CheckOut => "The event has not started, animals can only be checked out".to_string(),
        }));
    }

    let Some(panel) = card.check_panel_mut() else {
        return Ok(());
    };
    if animals.is_empty() {
        panel.select_all(true);
    } else {
        for animal_id in animals {
            if !panel.select(animal_id) {
                tracing::warn!("Animal {} is not assigned to event {}", animal_id, event_id);
            }
        }
    }

    let selected = panel.selected();
    let action = panel.action(Some(&me));

    let index = StatusIndex::new(queries.animal_statuses(None).await?);
    for &animal_id in &selected {
        println!("#{} {}", animal_id, index.line(animal_id, StatusDetail::Verbose).render());
    }

    match action {
        None => Err(AppError::Forbidden(
            "Your role does not grant checkin_animals".to_string(),
        )),
        Some(CheckAction::Cancel) => {
            card.back();
            println!("Nothing selected");
            Ok(())
        }
        Some(CheckAction::Submit(mode)) => {
            dashboard
                .services
                .checkinout
                .submit(&me, event_id, mode, &selected)
                .await?;
            Ok(())
        }
    }
}

async fn event_types(dashboard: &Dashboard, cmd: EventTypesCommand) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    let service = &dashboard.services.organization;
    let form = |args: EventTypeArgs| EventTypeForm {
        name: args.name,
        zoo_id: args.zoo,
        group_id: args.group,
    };

    match cmd {
        EventTypesCommand::List => println!("{}", render::event_types(&queries.event_types().await?)),
        EventTypesCommand::Create(args) => {
            let me = queries.user().await?;
            service.create_event_type(&me, &form(args)).await?;
        }
        EventTypesCommand::Update { id, event_type } => {
            let me = queries.user().await?;
            service.update_event_type(&me, id, &form(event_type)).await?;
        }
        EventTypesCommand::SetGroup { id, group } => {
            let me = queries.user().await?;
            service.move_event_type_to_group(&me, id, group).await?;
        }
        EventTypesCommand::SetZoo { id, zoo } => {
            let me = queries.user().await?;
            service.move_event_type_to_zoo(&me, id, zoo).await?;
        }
    }
    Ok(())
}

async fn groups(dashboard: &Dashboard, cmd: GroupsCommand) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    match cmd {
        GroupsCommand::List => println!("{}", render::groups(&queries.groups().await?)),
        GroupsCommand::Create { title, zoo } => {
            let me = queries.user().await?;
            let form = GroupForm { title, zoo_id: zoo };
            dashboard.services.organization.create_group(&me, &form).await?;
        }
    }
    Ok(())
}

async fn users(dashboard: &Dashboard, cmd: UsersCommand) -> AppResult<()> {
    let queries = &dashboard.services.queries;
    let service = &dashboard.services.users;
    match cmd {
        UsersCommand::List => println!("{}", render::users(&queries.users().await?)),
        UsersCommand::Show { id } => {
            let details = queries.user_details(id).await?;
            println!("{}", render::user(&details.user));
            println!("{}", render::user_events(&details));
        }
        UsersCommand::Handlers => println!("{}", render::handlers(&queries.handlers().await?)),
        UsersCommand::SetRole { id, role } => {
            let me = queries.user().await?;
            service.set_role(&me, id, &role).await?;
        }
        UsersCommand::SetTier { id, tier } => {
            let me = queries.user().await?;
            service.set_tier(&me, id, tier.value()).await?;
        }
        UsersCommand::SetGroup { id, group } => {
            let me = queries.user().await?;
            service.set_group(&me, id, group).await?;
        }
    }
    Ok(())
}

async fn report(dashboard: &Dashboard, args: ReportArgs) -> AppResult<()> {
    let me = dashboard.services.queries.user().await?;
    let today = Local::now().date_naive();
    let from = args.from.unwrap_or(today - Duration::days(7));
    let to = args.to.unwrap_or(today);

    let report = dashboard
        .services
        .reports
        .download(&me, from, to, args.entity.into(), today)
        .await?;
    let path = args.output.join(&report.file_name);
    tokio::fs::write(&path, &report.content).await?;
    println!("{}", path.display());
    Ok(())
}
