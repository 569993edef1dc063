// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use pws_server::random_question;

pub fn execute() {
    println!("{}", random_question(&mut rand::thread_rng()));
}
