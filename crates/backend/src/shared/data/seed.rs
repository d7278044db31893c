use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use contracts::domain::a001_agent::{Agent, AgentId, AgentStatus};
use contracts::domain::a002_user::{
    avatar_initials, CommissionHistoryEntry, User, UserId, UserKind, UserStatus,
};
use contracts::domain::a003_client::{Client, ClientId};
use contracts::domain::a004_chat_session::{ChatMessage, ChatSession, SessionKind};
use contracts::domain::a005_recharge::{PaymentMethod, Recharge, RechargeId, RechargeStatus};
use contracts::shared::commission::{CommissionSplit, DEFAULT_AGENT_SPLIT};
use contracts::shared::money::Paise;
use uuid::Uuid;

use crate::domain::a001_agent::repository as agent_repository;
use crate::domain::a002_user::repository as user_repository;
use crate::domain::a002_user::split_repository;
use crate::domain::a003_client::repository as client_repository;
use crate::domain::a004_chat_session::repository as session_repository;
use crate::domain::a005_recharge::repository as recharge_repository;

fn day(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(s.parse()?)
}

fn ts(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")?.and_utc())
}

fn split(rate: i64, admin: i64, agent: i64, user: i64) -> CommissionSplit {
    CommissionSplit {
        client_rate_per_minute: Paise::from_rupees(rate),
        admin_share: Paise::from_rupees(admin),
        agent_share: Paise::from_rupees(agent),
        user_share: Paise::from_rupees(user),
    }
}

fn agent(
    name: &str,
    phone: &str,
    team_size: i64,
    earnings: i64,
    wallet: i64,
    rate: i64,
    status: AgentStatus,
    joined: &str,
) -> anyhow::Result<Agent> {
    Ok(Agent {
        id: AgentId::new_v4(),
        name: name.into(),
        phone: phone.into(),
        team_size,
        total_earnings: Paise::from_rupees(earnings),
        wallet_balance: Paise::from_rupees(wallet),
        commission_rate: rate,
        status,
        joined_at: day(joined)?,
    })
}

fn user(
    name: &str,
    phone: &str,
    agent_id: Option<AgentId>,
    minutes: i64,
    earned: i64,
    rating: f32,
    status: UserStatus,
    audio_intro_url: Option<&str>,
    joined: &str,
) -> anyhow::Result<User> {
    let kind = if agent_id.is_some() {
        UserKind::AgentRecruited
    } else {
        UserKind::Independent
    };
    Ok(User {
        id: UserId::new_v4(),
        avatar: avatar_initials(name),
        name: name.into(),
        phone: phone.into(),
        kind,
        agent_id,
        total_minutes: minutes,
        total_earned: Paise::from_rupees(earned),
        rating,
        status,
        audio_intro_url: audio_intro_url.map(Into::into),
        joined_at: day(joined)?,
    })
}

fn client(
    name: &str,
    phone: &str,
    coin_balance: i64,
    spent: i64,
    recharge_count: i64,
    last_active: &str,
    joined: &str,
) -> anyhow::Result<Client> {
    Ok(Client {
        id: ClientId::new_v4(),
        name: name.into(),
        phone: phone.into(),
        coin_balance,
        total_spent: Paise::from_rupees(spent),
        recharge_count,
        last_active: day(last_active)?,
        joined_at: day(joined)?,
    })
}

fn assignment(
    user_id: &UserId,
    split: CommissionSplit,
    set_at: DateTime<Utc>,
    superseded_at: Option<DateTime<Utc>>,
) -> CommissionHistoryEntry {
    CommissionHistoryEntry {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.as_string(),
        split,
        set_by: "admin".into(),
        set_at,
        superseded_at,
    }
}

fn recharge(
    client_id: &ClientId,
    amount: i64,
    method: PaymentMethod,
    status: RechargeStatus,
    at: &str,
) -> anyhow::Result<Recharge> {
    Ok(Recharge {
        id: RechargeId::new_v4(),
        client_id: *client_id,
        amount: Paise::from_rupees(amount),
        method,
        status,
        recharged_at: ts(at)?,
    })
}

fn msg(sender: &str, text: &str, time: &str) -> ChatMessage {
    ChatMessage {
        sender: sender.into(),
        text: text.into(),
        time: time.into(),
    }
}

/// Insert the demo dataset on first start. Skipped as soon as any agent
/// exists, so a restarted server never duplicates rows.
pub async fn seed_demo_data() -> anyhow::Result<()> {
    if !agent_repository::list_all().await?.is_empty() {
        return Ok(());
    }
    tracing::info!("Seeding demo dataset");

    let rahul = agent("Rahul Sharma", "+91 98765 43210", 12, 45_000, 12_500, 10, AgentStatus::Active, "2024-11-15")?;
    let priya = agent("Priya Verma", "+91 91234 56780", 8, 32_000, 8_900, 10, AgentStatus::Active, "2024-12-01")?;
    let amit = agent("Amit Patel", "+91 99880 11223", 15, 58_000, 15_200, 12, AgentStatus::Active, "2024-10-20")?;
    let sneha = agent("Sneha Gupta", "+91 90909 80807", 5, 18_000, 4_500, 10, AgentStatus::Inactive, "2025-01-05")?;
    for entry in [&rahul, &priya, &amit, &sneha] {
        agent_repository::insert(entry).await?;
    }

    let ananya = user("Ananya Singh", "+91 99887 76655", Some(rahul.id), 2450, 85_750, 4.8, UserStatus::Active, None, "2024-11-20")?;
    let kavya = user("Kavya Reddy", "+91 98765 12340", None, 1890, 66_150, 4.5, UserStatus::Active, Some("/audio/kavya-intro.mp3"), "2024-12-10")?;
    let meera = user("Meera Joshi", "+91 91122 33445", Some(priya.id), 3200, 112_000, 4.9, UserStatus::Active, None, "2024-11-05")?;
    let ritu = user("Ritu Nair", "+91 90011 22334", None, 560, 19_600, 4.2, UserStatus::Pending, Some("/audio/ritu-intro.mp3"), "2025-01-15")?;
    let pooja = user("Pooja Mehta", "+91 98989 67676", Some(amit.id), 1200, 42_000, 4.6, UserStatus::Active, None, "2025-01-02")?;
    let deepa = user("Deepa Rao", "+91 97654 32109", None, 340, 11_900, 3.9, UserStatus::Pending, Some("/audio/deepa-intro.mp3"), "2025-02-01")?;
    for entry in [&ananya, &kavya, &meera, &ritu, &pooja, &deepa] {
        user_repository::insert(entry).await?;
    }

    let ananya_split = split(50, 10, 5, 35);
    let kavya_split = split(50, 15, 0, 35);
    let meera_split = split(60, 12, 8, 40);
    let ritu_split = split(40, 12, 0, 28);
    let pooja_split = split(50, 10, 7, 33);
    let deepa_split = split(45, 13, 0, 32);

    // Meera and Pooja were renegotiated in February; their original
    // default assignments stay archived under the new ones.
    let assignments = [
        assignment(&ananya.id, ananya_split, ts("2024-11-20 00:00")?, None),
        assignment(&kavya.id, kavya_split, ts("2024-12-10 00:00")?, None),
        assignment(&meera.id, DEFAULT_AGENT_SPLIT, ts("2024-11-05 00:00")?, Some(ts("2025-02-22 14:00")?)),
        assignment(&meera.id, meera_split, ts("2025-02-22 14:00")?, None),
        assignment(&ritu.id, ritu_split, ts("2025-01-15 00:00")?, None),
        assignment(&pooja.id, DEFAULT_AGENT_SPLIT, ts("2025-01-02 00:00")?, Some(ts("2025-02-22 10:00")?)),
        assignment(&pooja.id, pooja_split, ts("2025-02-22 10:00")?, None),
        assignment(&deepa.id, deepa_split, ts("2025-02-01 00:00")?, None),
    ];
    for entry in &assignments {
        split_repository::insert_entry(entry).await?;
    }

    let vikram = client("Vikram Malhotra", "+91 99001 12233", 2500, 45_000, 18, "2025-02-21", "2024-10-01")?;
    let rohan = client("Rohan Kapoor", "+91 98111 22334", 800, 28_000, 12, "2025-02-20", "2024-11-15")?;
    let sanjay = client("Sanjay Dubey", "+91 97222 33445", 150, 12_000, 6, "2025-02-18", "2025-01-01")?;
    let arjun = client("Arjun Iyer", "+91 96333 44556", 5200, 78_000, 32, "2025-02-22", "2024-09-10")?;
    let manish = client("Manish Tiwari", "+91 95444 55667", 0, 3_500, 2, "2025-01-30", "2025-01-20")?;
    for entry in [&vikram, &rohan, &sanjay, &arjun, &manish] {
        client_repository::insert(entry).await?;
    }

    // The two call sessions predate their users' renegotiated splits and
    // settled under the default agent template.
    let sessions = [
        ChatSession::settle(
            SessionKind::Chat,
            ananya.id,
            vikram.id,
            Some(rahul.id),
            ts("2025-02-22 14:30")?,
            45,
            &ananya_split,
        )?
        .with_messages(vec![
            msg("Vikram", "Hey, how are you?", "14:30"),
            msg("Ananya", "Hi Vikram! I'm great, thanks for asking 😊", "14:31"),
            msg("Vikram", "What are you up to today?", "14:32"),
            msg("Ananya", "Just relaxing at home. Tell me about your day!", "14:33"),
        ]),
        ChatSession::settle(
            SessionKind::Call,
            meera.id,
            arjun.id,
            Some(priya.id),
            ts("2025-02-22 13:15")?,
            22,
            &DEFAULT_AGENT_SPLIT,
        )?,
        ChatSession::settle(
            SessionKind::Chat,
            kavya.id,
            rohan.id,
            None,
            ts("2025-02-22 12:00")?,
            30,
            &kavya_split,
        )?
        .with_messages(vec![
            msg("Rohan", "Good afternoon!", "12:00"),
            msg("Kavya", "Hey Rohan! Good to see you again", "12:01"),
        ]),
        ChatSession::settle(
            SessionKind::Call,
            pooja.id,
            vikram.id,
            Some(amit.id),
            ts("2025-02-21 19:45")?,
            15,
            &DEFAULT_AGENT_SPLIT,
        )?,
        ChatSession::settle(
            SessionKind::Chat,
            ananya.id,
            sanjay.id,
            Some(rahul.id),
            ts("2025-02-21 16:20")?,
            60,
            &ananya_split,
        )?,
    ];
    for entry in &sessions {
        session_repository::insert(entry).await?;
    }

    let recharges = [
        recharge(&arjun.id, 5_000, PaymentMethod::Upi, RechargeStatus::Success, "2025-02-22 10:30")?,
        recharge(&vikram.id, 2_000, PaymentMethod::Card, RechargeStatus::Success, "2025-02-22 09:15")?,
        recharge(&rohan.id, 1_000, PaymentMethod::Upi, RechargeStatus::Success, "2025-02-21 18:00")?,
        recharge(&manish.id, 500, PaymentMethod::Upi, RechargeStatus::Failed, "2025-02-21 15:30")?,
        recharge(&sanjay.id, 1_500, PaymentMethod::Card, RechargeStatus::Success, "2025-02-20 12:00")?,
        recharge(&arjun.id, 3_000, PaymentMethod::NetBanking, RechargeStatus::Success, "2025-02-19 11:00")?,
    ];
    for entry in &recharges {
        recharge_repository::insert(entry).await?;
    }

    tracing::info!(
        "Demo dataset ready: 4 agents, 6 users, 5 clients, {} sessions, {} recharges",
        sessions.len(),
        recharges.len()
    );
    Ok(())
}
