mod checkout_commit_detaches_head;
mod checkout_unknown_reference_fails;
