use sov_bank::{Bank, BankConfig};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, Context, Module, WorkingSet};
use sov_state::InMemoryStorage;

use super::call::{CallMessage, VotingError};
use super::types::Voter;
use super::{Voting, VotingConfig};

type C = DefaultContext;

struct Setup {
    voting: Voting<C>,
    owner: C,
    working_set: WorkingSet<InMemoryStorage>,
}

fn setup(funded: &[(Address, u64)]) -> Setup {
    let mut working_set = WorkingSet::new(InMemoryStorage::new());
    let owner = generate_address::<C>("owner");

    let bank = Bank::<C>::default();
    bank.genesis(
        &BankConfig {
            address_and_balances: funded.to_vec(),
        },
        &mut working_set,
    )
    .unwrap();

    let voting = Voting::<C>::default();
    voting
        .genesis(&VotingConfig { owner }, &mut working_set)
        .unwrap();

    Setup {
        voting,
        owner: C::new(owner),
        working_set,
    }
}

#[test]
fn genesis_opens_an_empty_election() {
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);

    assert_eq!(voting.owner(&mut working_set), Some(*owner.sender()));
    assert!(!voting.is_closed(&mut working_set));
    assert!(voting.candidates(&mut working_set).is_empty());
    assert_eq!(voting.number_of_votes(&mut working_set), 0);
    assert_eq!(voting.get_contract_balance(&mut working_set), 0);
    assert_eq!(voting.winning_candidate_id(&mut working_set), None);
}

#[test]
fn genesis_cannot_run_twice() {
    let Setup {
        voting,
        mut working_set,
        ..
    } = setup(&[]);

    let other = generate_address::<C>("other");
    assert!(voting
        .genesis(&VotingConfig { owner: other }, &mut working_set)
        .is_err());
}

#[test]
fn candidate_ids_are_dense() {
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);
    let payout = generate_address::<C>("payout");

    for (expected, name) in [(1, "alpha"), (2, "beta"), (3, "gamma")] {
        let id = voting
            .add_candidate(name.to_owned(), payout, &owner, &mut working_set)
            .unwrap();
        assert_eq!(id, expected);
    }

    let names: Vec<_> = voting
        .candidates(&mut working_set)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn rejected_candidate_leaves_no_trace() {
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);
    let payout = generate_address::<C>("payout");

    assert_eq!(
        voting.add_candidate(String::new(), payout, &owner, &mut working_set),
        Err(VotingError::EmptyName)
    );

    let stranger = C::new(generate_address::<C>("stranger"));
    assert_eq!(
        voting.add_candidate("alpha".to_owned(), payout, &stranger, &mut working_set),
        Err(VotingError::Unauthorized)
    );

    assert!(voting.candidates(&mut working_set).is_empty());
    assert!(working_set.events().is_empty());
}

#[test]
fn vote_records_voter_and_event() {
    let voter = generate_address::<C>("voter");
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[(voter, 10)]);
    let payout = generate_address::<C>("payout");

    voting
        .add_candidate("alpha".to_owned(), payout, &owner, &mut working_set)
        .unwrap();
    working_set.take_events();

    let voter_context = C::new(voter);
    voting
        .call(
            CallMessage::Vote {
                candidate_id: 1,
                contribution: 4,
            },
            &voter_context,
            &mut working_set,
        )
        .unwrap();

    assert_eq!(
        voting.voters.get(&voter, &mut working_set),
        Some(Voter::Voted { candidate_id: 1 })
    );
    assert_eq!(voting.get_candidate(1, &mut working_set).unwrap().vote_count, 1);
    assert_eq!(voting.get_contract_balance(&mut working_set), 4);
    assert_eq!(
        voting.bank.get_balance_of(&voting.address, &mut working_set),
        Some(4)
    );

    let events = working_set.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key(), "Voting: vote");
    assert_eq!(
        events[0].value(),
        format!("Vote from: {} accepted for candidate 1", voter)
    );
}

#[test]
fn leading_candidate_prefers_lowest_id_on_ties() {
    let voters: Vec<_> = (0..4)
        .map(|i| generate_address::<C>(&format!("voter_{i}")))
        .collect();
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);
    let payout = generate_address::<C>("payout");

    for name in ["a", "b", "c"] {
        voting
            .add_candidate(name.to_owned(), payout, &owner, &mut working_set)
            .unwrap();
    }

    // b: 2, c: 2, a: 0
    for (voter, candidate_id) in voters.iter().zip([3, 2, 3, 2]) {
        voting
            .vote(candidate_id, 0, &C::new(*voter), &mut working_set)
            .unwrap();
    }

    let leader = voting.leading_candidate(&mut working_set).unwrap();
    assert_eq!(leader.id, 2);
    assert_eq!(leader.vote_count, 2);
}

#[test]
fn closing_without_candidates_fails() {
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);

    assert_eq!(
        voting.close_voting(&owner, &mut working_set),
        Err(VotingError::NoCandidates)
    );
    assert!(!voting.is_closed(&mut working_set));
}

#[test]
fn close_without_votes_picks_first_candidate() {
    let Setup {
        voting,
        owner,
        mut working_set,
    } = setup(&[]);
    let payout = generate_address::<C>("payout");

    voting
        .add_candidate("alpha".to_owned(), payout, &owner, &mut working_set)
        .unwrap();
    voting
        .add_candidate("beta".to_owned(), payout, &owner, &mut working_set)
        .unwrap();

    assert_eq!(voting.close_voting(&owner, &mut working_set), Ok(1));
    assert_eq!(voting.winning_candidate_id(&mut working_set), Some(1));
    // Nothing was contributed, so nothing moves.
    assert_eq!(voting.bank.get_balance_of(&payout, &mut working_set), None);
}

#[test]
fn missing_genesis_is_reported() {
    let mut working_set = WorkingSet::new(InMemoryStorage::new());
    let voting = Voting::<C>::default();
    let sender = C::new(generate_address::<C>("sender"));

    let err = voting.vote(1, 0, &sender, &mut working_set).unwrap_err();
    assert!(matches!(err, VotingError::MissingState(_)));
}

#[test]
fn call_messages_read_from_json() {
    let payout = generate_address::<C>("payout");

    let msg: CallMessage<C> = serde_json::from_str(r#"{"vote":{"candidate_id":2}}"#).unwrap();
    assert_eq!(
        msg,
        CallMessage::Vote {
            candidate_id: 2,
            contribution: 0
        }
    );

    let json = format!(r#"{{"add_candidate":{{"name":"alpha","payout_address":"{payout}"}}}}"#);
    let msg: CallMessage<C> = serde_json::from_str(&json).unwrap();
    assert_eq!(
        msg,
        CallMessage::AddCandidate {
            name: "alpha".to_owned(),
            payout_address: payout
        }
    );

    let msg: CallMessage<C> = serde_json::from_str(r#""close_voting""#).unwrap();
    assert_eq!(msg, CallMessage::CloseVoting);
}
