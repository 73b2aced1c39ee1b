mod helpers;

use helpers::*;
use proptest::prelude::*;
use sov_modules_api::Module;
use sov_voting::CallMessage;

const VOTERS: usize = 6;
const FUNDS: u64 = 1_000;

#[derive(Debug, Clone)]
enum Op {
    AddCandidate,
    Vote {
        voter: usize,
        candidate_id: u64,
        contribution: u64,
    },
    Close,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::AddCandidate),
        4 => (0..VOTERS, 0u64..5, 0..FUNDS + 100).prop_map(|(voter, candidate_id, contribution)| {
            Op::Vote { voter, candidate_id, contribution }
        }),
        1 => Just(Op::Close),
    ]
}

fn voter_name(i: usize) -> String {
    format!("voter_{i}")
}

proptest! {
    #[test]
    fn tallies_stay_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let names: Vec<String> = (0..VOTERS).map(voter_name).collect();
        let funded: Vec<(&str, u64)> = names.iter().map(|n| (n.as_str(), FUNDS)).collect();
        let Election { voting, bank, owner, mut working_set } = deploy(&funded);

        let mut closed_with = None;

        for op in ops {
            let result = match op {
                Op::AddCandidate => voting.call(
                    CallMessage::AddCandidate {
                        name: "candidate".to_owned(),
                        payout_address: address("payout"),
                    },
                    &owner,
                    &mut working_set,
                ),
                Op::Vote { voter, candidate_id, contribution } => voting.call(
                    CallMessage::Vote { candidate_id, contribution },
                    &context(&voter_name(voter)),
                    &mut working_set,
                ),
                Op::Close => voting.call(CallMessage::CloseVoting, &owner, &mut working_set),
            };

            let winner = voting.winning_candidate_id(&mut working_set);
            if let Some(previous) = closed_with {
                // Nothing changes the outcome after close.
                prop_assert!(result.is_err());
                prop_assert_eq!(winner, Some(previous));
            } else if voting.is_closed(&mut working_set) {
                closed_with = winner;
            }

            let candidates = voting.candidates(&mut working_set);
            let tally: u64 = candidates.iter().map(|c| c.vote_count).sum();
            prop_assert_eq!(tally, voting.number_of_votes(&mut working_set));

            let voted = names
                .iter()
                .filter(|n| voting.has_voted(&address(n), &mut working_set))
                .count() as u64;
            prop_assert_eq!(voted, tally);

            let held = bank
                .get_balance_of(&voting.address, &mut working_set)
                .unwrap_or_default();
            prop_assert_eq!(held, voting.get_contract_balance(&mut working_set));

            let paid = bank
                .get_balance_of(&address("payout"), &mut working_set)
                .unwrap_or_default();
            let remaining: u64 = names
                .iter()
                .map(|n| bank.get_balance_of(&address(n), &mut working_set).unwrap_or_default())
                .sum();
            prop_assert_eq!(held + paid + remaining, FUNDS * VOTERS as u64);

            if let Some(id) = winner {
                let top = candidates.iter().map(|c| c.vote_count).max().unwrap_or_default();
                let first_top = candidates.iter().find(|c| c.vote_count == top).map(|c| c.id);
                prop_assert_eq!(Some(id), first_top);
            }
        }
    }
}
