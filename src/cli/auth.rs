use tabled::{Table, Tabled};

use super::Context;
use crate::{
    error,
    error::SessionError,
    info, success,
    types::{ProfileUpdate, Registration},
    utils, warning,
};

#[derive(Tabled)]
struct AccountRow {
    field: &'static str,
    value: String,
}

fn password_or_prompt(password: Option<String>) -> String {
    match password.or_else(|| utils::prompt("Password")) {
        Some(p) => p,
        None => error!("A password is required"),
    }
}

pub async fn register(ctx: &Context, username: String, email: String, password: Option<String>) {
    let registration = Registration {
        username,
        email,
        password: password_or_prompt(password),
    };

    let pb = utils::spinner("Creating account...");
    let result = ctx.gateway.register(&registration).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success!("Account {} created.", registration.username);
            info!("Run tunedeck auth login to sign in");
        }
        Err(e) => warning!("{}", e.reason()),
    }
}

pub async fn login(ctx: &Context, email: String, password: Option<String>) {
    let password = password_or_prompt(password);

    let pb = utils::spinner("Signing in...");
    let result = ctx.session.sign_in(&ctx.gateway, &email, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(session) => success!("Signed in as {}", session.user.username),
        Err(SessionError::Gateway(e)) => warning!("{}", e.reason()),
        Err(e) => warning!("{}", e),
    }
}

pub async fn logout(ctx: &Context) {
    if !ctx.session.is_signed_in() {
        info!("Not signed in.");
        return;
    }

    match ctx.session.sign_out().await {
        Ok(()) => success!("Signed out."),
        Err(e) => warning!("Cannot remove session. Err: {}", e),
    }
}

pub async fn whoami(ctx: &Context) {
    let Some(session) = ctx.session.current() else {
        info!("Not signed in.");
        return;
    };

    let signed_in = chrono::DateTime::from_timestamp(session.obtained_at as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let rows = vec![
        AccountRow {
            field: "id",
            value: session.user.id,
        },
        AccountRow {
            field: "username",
            value: session.user.username,
        },
        AccountRow {
            field: "email",
            value: session.user.email,
        },
        AccountRow {
            field: "signed in",
            value: signed_in,
        },
    ];
    println!("{}", Table::new(rows));
}

pub async fn profile(ctx: &Context, update: ProfileUpdate) {
    ctx.require_session();
    if update.is_empty() {
        warning!("Nothing to update. Pass --username, --email or --password.");
        return;
    }

    let pb = utils::spinner("Updating profile...");
    let result = ctx.gateway.update_profile(&update).await;
    pb.finish_and_clear();

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            warning!("{}", e.reason());
            return;
        }
    };

    if let Err(e) = ctx.session.replace_user(user.clone()).await {
        warning!("Profile updated but the session could not be saved. Err: {}", e);
        return;
    }
    success!("Profile updated for {}", user.username);
}
