/*
[INPUT]:  Parsed subcommands from main
[OUTPUT]: Interactive config setup and headless flow commands
[POS]:    CLI module root
[UPDATE]: When adding subcommands
*/

pub mod headless;
pub mod init;
