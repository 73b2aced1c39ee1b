mod helpers;

use std::thread;

use helpers::*;
use sov_voting::VotingError;

const THREADS: usize = 8;

#[test]
fn concurrent_votes_from_one_sender_count_once() {
    let runner = init_runner(&[("voter", 1000)]);
    runner
        .apply_tx(address("owner"), add_candidate("a", "payout"))
        .unwrap();
    runner
        .apply_tx(address("owner"), add_candidate("b", "payout"))
        .unwrap();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let runner = &runner;
                s.spawn(move || runner.apply_tx(address("voter"), vote(1 + (i as u64 % 2), 10)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(
            err.downcast_ref::<VotingError>(),
            Some(&VotingError::AlreadyVoted)
        );
    }

    let (votes, balance, tally) = runner.query(|runtime, working_set| {
        let tally: u64 = runtime
            .voting
            .candidates(working_set)
            .iter()
            .map(|c| c.vote_count)
            .sum();
        (
            runtime.voting.number_of_votes(working_set),
            runtime.voting.get_contract_balance(working_set),
            tally,
        )
    });
    assert_eq!(votes, 1);
    assert_eq!(tally, 1);
    assert_eq!(balance, 10);
}

#[test]
fn readers_see_whole_transactions() {
    let voters: Vec<String> = (0..THREADS).map(|i| format!("voter_{i}")).collect();
    let funded: Vec<(&str, u64)> = voters.iter().map(|v| (v.as_str(), 10)).collect();
    let runner = init_runner(&funded);
    runner
        .apply_tx(address("owner"), add_candidate("a", "payout"))
        .unwrap();

    thread::scope(|s| {
        for voter in &voters {
            let runner = &runner;
            s.spawn(move || runner.apply_tx(address(voter), vote(1, 10)).unwrap());
        }

        for _ in 0..THREADS {
            let runner = &runner;
            s.spawn(move || {
                for _ in 0..50 {
                    let (votes, balance, held) = runner.query(|runtime, working_set| {
                        let voting = &runtime.voting;
                        (
                            voting.number_of_votes(working_set),
                            voting.get_contract_balance(working_set),
                            runtime
                                .bank
                                .get_balance_of(&voting.address, working_set)
                                .unwrap_or_default(),
                        )
                    });
                    assert_eq!(balance, votes * 10);
                    assert_eq!(held, balance);
                }
            });
        }
    });

    let votes = runner.query(|runtime, working_set| runtime.voting.number_of_votes(working_set));
    assert_eq!(votes, THREADS as u64);
}

#[test]
fn close_is_ordered_against_votes() {
    let voters: Vec<String> = (0..THREADS).map(|i| format!("voter_{i}")).collect();
    let runner = init_runner(&[]);
    runner
        .apply_tx(address("owner"), add_candidate("a", "payout"))
        .unwrap();

    let accepted = thread::scope(|s| {
        let votes: Vec<_> = voters
            .iter()
            .map(|voter| {
                let runner = &runner;
                s.spawn(move || runner.apply_tx(address(voter), vote(1, 0)))
            })
            .collect();
        let close = s.spawn(|| runner.apply_tx(address("owner"), close_voting()));

        assert!(close.join().unwrap().is_ok());
        votes
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| match r {
                Ok(_) => true,
                Err(e) => {
                    assert_eq!(
                        e.downcast_ref::<VotingError>(),
                        Some(&VotingError::ElectionClosed)
                    );
                    false
                }
            })
            .count() as u64
    });

    let candidate = runner.query(|runtime, working_set| {
        runtime.voting.get_candidate(1, working_set).unwrap()
    });
    // The winner's tally is frozen at close.
    assert_eq!(candidate.vote_count, accepted);
}
