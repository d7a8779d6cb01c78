use client::{AppState, Client, DebtMemo, ExpenseStore};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "valigia={level},client={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let client = Client::new(
        &settings.server.base_url,
        &settings.server.username,
        &settings.server.password,
    )?;

    // The signed-in account doubles as the viewpoint participant.
    let mut state = AppState::new(settings.app.theme);
    state.sign_in(
        settings.server.username.clone(),
        settings.server.username.clone(),
    );

    let trip = client.trip_get(&settings.trip.id).await?;
    tracing::info!(
        trip = %trip.name,
        base_currency = %trip.base_currency,
        participants = trip.participants.len(),
        "loaded trip"
    );

    let mut store = ExpenseStore::new(trip.id.clone(), trip.base_currency.clone());
    store.sync(&client).await?;

    let Some(viewpoint) = state.viewpoint_user().map(str::to_string) else {
        tracing::warn!("no signed-in user, nothing to report");
        return Ok(());
    };

    // Prefer the server-computed aggregates when the endpoint exists.
    let backend = client.debts_get(&trip.id, &viewpoint).await?;
    let mut memo = DebtMemo::default();
    let summary = memo.summary(&store, &viewpoint, backend.as_ref());

    tracing::info!(
        viewpoint = %viewpoint,
        net_balance = summary.net_balance,
        receivable = summary.total_receivable,
        payable = summary.total_payable,
        "debt position"
    );
    for entry in &summary.who_owes_me {
        tracing::info!(
            amount = entry.amount,
            transactions = entry.transactions.len(),
            "{} owes {viewpoint}",
            entry.counterparty_id
        );
    }
    for entry in &summary.i_owe_who {
        tracing::info!(
            amount = entry.amount,
            transactions = entry.transactions.len(),
            "{viewpoint} owes {}",
            entry.counterparty_id
        );
    }

    Ok(())
}
