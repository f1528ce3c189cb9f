// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Studydesk v{} - Student planner: due dates from plain text, class sessions, tasks",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] parse <text...>", binary_name);
    println!("    {} [OPTIONS] add <text...>", binary_name);
    println!("    {} [OPTIONS] list", binary_name);
    println!("    {} [OPTIONS] done <id>", binary_name);
    println!("    {} [OPTIONS] rm <id>", binary_name);
    println!("    {} [OPTIONS] schedule <id>", binary_name);
    println!(
        "    {} [OPTIONS] sessions <class.toml|class.json> [--class-id <id>] [--user-id <id>] [--ics]",
        binary_name
    );
    println!(
        "    {} [OPTIONS] plan <class.toml|class.json> [--save] [--ics]",
        binary_name
    );
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    --today <YYYY-MM-DD>  Pretend today is this date.");
    println!("    -v, --verbose         Debug logging on stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("DATE PHRASES (first match wins):");
    println!("    today");
    println!("    tomorrow, tmr");
    println!("    next <weekday>        next monday, next tues, next thur ...");
    println!("    [on] <month> <day>    March 12, on mar 12th, dec 25 2027");
    println!();
    println!("EXAMPLES:");
    println!("    {} add Call mom tomorrow", binary_name);
    println!("    {} add Buy groceries on March 12", binary_name);
    println!("    {} parse \"Essay due next Friday\"", binary_name);
    println!("    {} sessions cs101.toml --ics > cs101.ics", binary_name);
    println!("    {} plan cs101.toml --save", binary_name);
    println!();
    println!("CLASS FILE (TOML):");
    println!("    id = \"cs101\"");
    println!("    name = \"Introduction to Computer Science\"");
    println!("    code = \"CS 101\"");
    println!("    meeting_days = [1, 3, 5]   # 0 = Sunday .. 6 = Saturday");
    println!("    start_time = \"09:00\"");
    println!("    end_time = \"09:50\"");
    println!("    location = \"Room 204\"");
    println!("    semester_start = \"2025-08-18\"");
    println!("    semester_end = \"2025-12-10\"");
}
