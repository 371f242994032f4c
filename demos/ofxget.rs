use cmdarg::{Argument, CommandLineParser, Scalar, Syntax};

fn main() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "ofxget".to_string());
    let command_line = CommandLineParser::new(program)
        .add(
            Argument::new(Scalar::<String>::default(), "request", Some('r'))
                .placeholder("request_file")
                .description("File containing the OFX request."),
        )
        .add(
            Argument::new(Scalar::new(0i64), "institution", Some('i'))
                .placeholder("institution_id")
                .description("Id of the financial institution to contact."),
        )
        .add(
            Argument::new(Scalar::<String>::default(), "passwords", Some('p'))
                .placeholder("passwords_file")
                .description("File of passwords, one per institution.")
                .syntax(Syntax::OPTIONAL),
        )
        .build();

    let matches = command_line.parse();
    let request: String = matches.get("request").unwrap_or_default();
    let institution: i64 = matches.get("institution").unwrap_or_default();

    println!("Request: {request}");
    println!("Institution: {institution}");

    if matches.is_found("passwords") {
        let passwords: String = matches.get("passwords").unwrap_or_default();
        println!("Passwords: {passwords}");
    }

    // Fetching the statement from the institution is not part of this demo.
}
