use anyhow::Result;
use colored::Colorize;
use quizzify_application::Store;
use quizzify_core::session::PermissionLevel;

use super::restore_session;

/// `show_token` prints the token for reuse with `--token`, since an
/// ephemeral session forgets it on exit.
pub async fn login(store: &Store, login: &str, password: &str, show_token: bool) -> Result<()> {
    let response = store.auth().login(login, password).await?;
    let profile = store.auth().fetch_user_data(Some(&response.token)).await?;
    println!(
        "{}",
        format!("Logged in as {} (user {})", login, profile.user_id).green()
    );
    if show_token {
        println!("{}", response.token);
    }
    Ok(())
}

pub async fn register(store: &Store, login: &str, password: &str, email: &str) -> Result<()> {
    store.auth().register(login, password, email).await?;
    println!("{}", format!("Registered {}", login).green());
    Ok(())
}

pub fn logout(store: &Store) {
    store.auth().logout();
    println!("{}", "Logged out".green());
}

pub async fn whoami(store: &Store) -> Result<()> {
    let profile = restore_session(store).await?;

    let role = [
        PermissionLevel::Admin,
        PermissionLevel::Moderator,
        PermissionLevel::Creator,
    ]
    .into_iter()
    .find(|level| profile.has_permission(*level))
    .map(|level| format!("{:?}", level))
    .unwrap_or_else(|| "User".to_string());

    println!("{} {}", "User id:".bold(), profile.user_id);
    println!("{} {}", "Role:".bold(), role);
    println!("{} {:?}", "Permissions:".bold(), profile.permissions);
    for (key, value) in &profile.extra {
        println!("{} {}", format!("{}:", key).bold(), value);
    }
    Ok(())
}

pub async fn list_accounts(store: &Store) -> Result<()> {
    restore_session(store).await?;
    let accounts = store.auth().accounts_list().await?;

    if accounts.is_empty() {
        println!("{}", "No accounts".bright_black());
    }
    for account in &accounts {
        println!(
            "{:>6}  {:<20} {}",
            account.id.to_string().cyan(),
            account.login.as_deref().unwrap_or("-"),
            account.email.as_deref().unwrap_or("").bright_black()
        );
    }
    Ok(())
}

pub async fn delete_account(store: &Store, id: i64) -> Result<()> {
    restore_session(store).await?;
    store.auth().delete_account(id).await?;
    println!("{}", format!("Deleted account {}", id).green());
    Ok(())
}
