use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    apkup completions --shell bash > ~/.bash_completion.d/apkup\n\n\
                  Generate zsh completions:\n    apkup completions --shell zsh > ~/.zfunc/_apkup\n\n\
                  Generate fish completions:\n    apkup completions --shell fish > ~/.config/fish/completions/apkup.fish\n\n\
                  Generate PowerShell completions:\n    apkup completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
