use std::collections::HashMap;

use crate::domain::a004_chat_session::ChatSession;

use super::dto::{EarningsTotals, UserEarningsTotals};

/// Sum the recorded amounts of `sessions` into one totals row.
///
/// Amounts are taken from the session records as stored; the current
/// commission splits play no part here. An empty slice yields all
/// zeros.
pub fn summarize(sessions: &[ChatSession]) -> EarningsTotals {
    let mut totals = EarningsTotals::default();
    for session in sessions {
        totals.total_client_spent += session.client_spent;
        totals.total_admin_earned += session.admin_earned;
        totals.total_agent_earned += session.agent_earned;
        totals.total_user_earned += session.user_earned;
        totals.session_count += 1;
        totals.total_minutes += session.minutes;
    }
    totals
}

/// Group `sessions` by the performing user and sum each group.
///
/// Rows keep the order in which each user first appears in the input,
/// so the same register always reports in the same order. Users with no
/// sessions in the input simply have no row.
pub fn summarize_by_user(sessions: &[ChatSession]) -> Vec<UserEarningsTotals> {
    let mut rows: Vec<UserEarningsTotals> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let user_id = session.user_id.as_string();
        let at = *index.entry(user_id.clone()).or_insert_with(|| {
            rows.push(UserEarningsTotals {
                user_id,
                totals: EarningsTotals::default(),
            });
            rows.len() - 1
        });
        let totals = &mut rows[at].totals;
        totals.total_client_spent += session.client_spent;
        totals.total_admin_earned += session.admin_earned;
        totals.total_agent_earned += session.agent_earned;
        totals.total_user_earned += session.user_earned;
        totals.session_count += 1;
        totals.total_minutes += session.minutes;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_user::UserId;
    use crate::domain::a003_client::ClientId;
    use crate::domain::a004_chat_session::{SessionId, SessionKind};
    use crate::shared::money::Paise;
    use chrono::Utc;

    fn session(user_id: UserId, minutes: i64, admin: i64, agent: i64, user: i64) -> ChatSession {
        ChatSession {
            id: SessionId::new_v4(),
            kind: SessionKind::Chat,
            user_id,
            client_id: ClientId::new_v4(),
            agent_id: None,
            started_at: Utc::now(),
            minutes,
            client_spent: Paise::from_rupees(admin + agent + user),
            admin_earned: Paise::from_rupees(admin),
            agent_earned: Paise::from_rupees(agent),
            user_earned: Paise::from_rupees(user),
            messages: Vec::new(),
        }
    }

    #[test]
    fn admin_earnings_sum_across_sessions() {
        let user = UserId::new_v4();
        let sessions = vec![
            session(user, 45, 450, 0, 1125),
            session(user, 22, 220, 110, 770),
        ];
        let totals = summarize(&sessions);
        assert_eq!(totals.total_admin_earned, Paise::from_rupees(670));
        assert_eq!(totals.session_count, 2);
        assert_eq!(totals.total_minutes, 67);
    }

    #[test]
    fn empty_register_reports_zeros() {
        let totals = summarize(&[]);
        assert_eq!(totals, EarningsTotals::default());
        assert_eq!(totals.total_client_spent, Paise::ZERO);
        assert!(summarize_by_user(&[]).is_empty());
    }

    #[test]
    fn totals_ignore_session_order() {
        let a = UserId::new_v4();
        let b = UserId::new_v4();
        let mut sessions = vec![
            session(a, 10, 100, 50, 350),
            session(b, 20, 200, 0, 700),
            session(a, 5, 50, 25, 175),
        ];
        let forward = summarize(&sessions);
        sessions.reverse();
        assert_eq!(summarize(&sessions), forward);
    }

    #[test]
    fn recorded_amounts_are_summed_as_stored() {
        // Amounts that no current split would produce still count;
        // history is never recomputed.
        let user = UserId::new_v4();
        let mut odd = session(user, 1, 7, 3, 11);
        odd.client_spent = Paise(2101);
        let totals = summarize(&[odd]);
        assert_eq!(totals.total_client_spent, Paise(2101));
        assert_eq!(totals.total_admin_earned, Paise::from_rupees(7));
    }

    #[test]
    fn by_user_groups_and_keeps_first_seen_order() {
        let a = UserId::new_v4();
        let b = UserId::new_v4();
        let sessions = vec![
            session(b, 10, 100, 0, 350),
            session(a, 30, 300, 150, 1050),
            session(b, 20, 200, 0, 700),
        ];
        let rows = summarize_by_user(&sessions);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, b.as_string());
        assert_eq!(rows[0].totals.total_admin_earned, Paise::from_rupees(300));
        assert_eq!(rows[0].totals.session_count, 2);
        assert_eq!(rows[1].user_id, a.as_string());
        assert_eq!(rows[1].totals.total_agent_earned, Paise::from_rupees(150));
    }

    #[test]
    fn by_user_rows_add_up_to_the_grand_total() {
        let a = UserId::new_v4();
        let b = UserId::new_v4();
        let sessions = vec![
            session(a, 12, 120, 60, 420),
            session(b, 8, 80, 0, 280),
            session(a, 3, 30, 15, 105),
        ];
        let grand = summarize(&sessions);
        let rows = summarize_by_user(&sessions);
        let from_rows: Paise = rows.iter().map(|r| r.totals.total_admin_earned).sum();
        assert_eq!(from_rows, grand.total_admin_earned);
        let count: i64 = rows.iter().map(|r| r.totals.session_count).sum();
        assert_eq!(count, grand.session_count);
    }
}
